pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::posts::models::Post;

pub use memory::InMemoryPostRepository;
pub use postgres::PgPostRepository;

/// Persistence collaborator for posts.
///
/// "Published" listings only return posts whose publication date has passed;
/// draft filtering beyond that is service logic.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn get_by_id(&self, id: i32) -> Result<Option<Post>>;

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Post>>;

    /// Currently visible posts, newest first.
    async fn list_published(&self) -> Result<Vec<Post>>;

    async fn list_published_by_category(&self, category_id: i32) -> Result<Vec<Post>>;

    /// Visible posts in any of the given categories, newest first.
    async fn list_published_by_categories(&self, category_ids: &[i32]) -> Result<Vec<Post>>;

    async fn list_recent_published(&self, count: i64) -> Result<Vec<Post>>;

    async fn list_recent_published_by_category(
        &self,
        category_id: i32,
        count: i64,
    ) -> Result<Vec<Post>>;

    /// Every post by the author, drafts included, newest first.
    async fn list_by_author(&self, author_id: &str) -> Result<Vec<Post>>;

    async fn list_drafts_by_author(&self, author_id: &str) -> Result<Vec<Post>>;

    /// Case-insensitive substring search over title, slug, meta description,
    /// and body of visible posts.
    async fn search_published(&self, query: &str, limit: i64) -> Result<Vec<Post>>;

    /// Whether a slug is taken, optionally ignoring one post id (for updates).
    async fn slug_exists(&self, slug: &str, exclude_id: Option<i32>) -> Result<bool>;

    /// Insert a new post (id is assigned by the store) and return it.
    async fn insert(&self, post: Post) -> Result<Post>;

    async fn update(&self, post: &Post) -> Result<()>;

    async fn delete(&self, id: i32) -> Result<()>;
}
