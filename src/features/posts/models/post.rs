use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::shared::audit::Audit;

/// Database model for a blog post.
///
/// `publication_date` is `None` until the post is scheduled or published.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Post {
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
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: Audit,
}

impl Post {
    /// Whether the post is publicly visible at the given instant.
    pub fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        self.is_published && self.publication_date.is_some_and(|date| date <= now)
    }
}
