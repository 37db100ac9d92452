pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::categories::models::Category;

pub use memory::InMemoryCategoryRepository;
pub use postgres::PgCategoryRepository;

/// Posts and lead magnets still referencing a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DependentCounts {
    pub posts: i64,
    pub lead_magnets: i64,
}

/// Persistence collaborator for categories.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn get_by_id(&self, id: i32) -> Result<Option<Category>>;

    /// All categories (active and inactive) owned by the user.
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Category>>;

    /// Active categories owned by the user.
    async fn list_active_by_user(&self, user_id: &str) -> Result<Vec<Category>>;

    /// Categories without a parent, owned by the user.
    async fn list_roots_by_user(&self, user_id: &str) -> Result<Vec<Category>>;

    /// Direct children of the given category.
    async fn list_children(&self, parent_category_id: i32) -> Result<Vec<Category>>;

    /// Number of posts and lead magnets referencing the category.
    async fn dependent_counts(&self, category_id: i32) -> Result<DependentCounts>;

    /// Insert a new category (id is assigned by the store) and return it.
    async fn insert(&self, category: Category) -> Result<Category>;

    async fn update(&self, category: &Category) -> Result<()>;

    async fn delete(&self, id: i32) -> Result<()>;
}
