pub mod transaction_service;
pub mod valuation_service;
