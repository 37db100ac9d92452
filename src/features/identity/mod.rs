//! Identity glue over an external authentication provider.
//!
//! Credential verification, session establishment, and lockout accounting
//! live behind [`provider::IdentityProvider`]; this feature owns the login
//! policy: uniform failure messages (no account enumeration), a distinct
//! lockout message, and last-login stamping.

pub mod dtos;
pub mod models;
pub mod provider;
pub mod services;

pub use provider::IdentityProvider;
pub use services::IdentityService;
