pub mod catalog;
pub mod price;
pub mod summary;
pub mod transaction;
