//! Blog posts: drafts, scheduled publishing, and public listings.
//!
//! A post is externally visible only when published with a publication date
//! in the past; drafts never leak to anyone but their author. Slugs are
//! globally unique and screened against URL-injection patterns.

pub mod dtos;
pub mod models;
pub mod repositories;
pub mod services;
pub mod validation;

pub use repositories::PostRepository;
pub use services::PostService;
