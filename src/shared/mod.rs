pub mod audit;
pub mod constants;
pub mod ownership;
pub mod sanitize;
pub mod types;
pub mod validation;
