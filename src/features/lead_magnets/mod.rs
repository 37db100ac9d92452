//! Lead magnets: gated downloadable assets attached to a category.
//!
//! Ownership is transitive through the category, so every mutation resolves
//! the category and checks its owner.

pub mod dtos;
pub mod models;
pub mod repositories;
pub mod services;
pub mod validation;

pub use repositories::LeadMagnetRepository;
pub use services::LeadMagnetService;
