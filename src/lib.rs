//! Mossgate core — multi-tenant content-management backend.
//!
//! Library crate consumed by the Mossgate web front end. Users manage
//! hierarchical categories, blog posts, and lead magnets; every mutation is
//! gated by ownership checks and defensive input validation. Persistence and
//! session machinery are collaborators behind async traits, so the crate
//! carries no wire protocol of its own.

pub mod core;
pub mod features;
pub mod shared;

pub use crate::core::error::{AppError, Result};
