pub mod registry;
pub mod traits;

// Feed implementations
pub mod coincap;
