use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::features::posts::models::Post;
use crate::shared::audit::Audit;

/// Create request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostDto {
    /// Author of the post; must match the authenticated requester.
    #[validate(length(min = 1, message = "AuthorId is required."))]
    pub author_id: String,

    pub category_id: Option<i32>,

    #[validate(custom(function = crate::features::posts::validation::check_title))]
    pub title: String,

    #[validate(length(min = 1, message = "Slug is required."))]
    pub slug: String,

    pub content_body: Option<String>,

    pub featured_image_url: Option<String>,

    #[validate(custom(function = crate::features::posts::validation::check_meta_description))]
    pub meta_description: Option<String>,

    pub publication_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub is_published: bool,
}

/// Update request (full replace of mutable fields; the author is immutable)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePostDto {
    pub id: i32,

    #[validate(length(min = 1, message = "AuthorId is required."))]
    pub author_id: String,

    pub category_id: Option<i32>,

    #[validate(custom(function = crate::features::posts::validation::check_title))]
    pub title: String,

    #[validate(length(min = 1, message = "Slug is required."))]
    pub slug: String,

    pub content_body: Option<String>,

    pub featured_image_url: Option<String>,

    #[validate(custom(function = crate::features::posts::validation::check_meta_description))]
    pub meta_description: Option<String>,

    pub publication_date: Option<DateTime<Utc>>,

    pub is_published: bool,
}

/// Response DTO for a post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponseDto {
    pub id: i32,
    pub author_id: String,
    pub category_id: Option<i32>,
    pub title: String,
    pub slug: String,
    pub content_body: Option<String>,
    pub featured_image_url: Option<String>,
    pub meta_description: Option<String>,
    pub publication_date: Option<DateTime<Utc>>,
    pub is_published: bool,
    #[serde(flatten)]
    pub audit: Audit,
}

impl From<Post> for PostResponseDto {
    fn from(p: Post) -> Self {
        Self {
            id: p.id,
            author_id: p.author_id,
            category_id: p.category_id,
            title: p.title,
            slug: p.slug,
            content_body: p.content_body,
            featured_image_url: p.featured_image_url,
            meta_description: p.meta_description,
            publication_date: p.publication_date,
            is_published: p.is_published,
            audit: p.audit,
        }
    }
}
