//! Hierarchical, user-owned content categories.
//!
//! Categories form a tree per owner: every category may reference a parent
//! owned by the same user, and the service guards against self-parenting and
//! cycles across the whole ancestor chain. Deletion is blocked while child
//! categories exist; soft deletion flips the active flag instead.

pub mod dtos;
pub mod models;
pub mod repositories;
pub mod services;
pub mod validation;

pub use repositories::CategoryRepository;
pub use services::CategoryService;
