use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::Category;
use crate::features::categories::repositories::{CategoryRepository, DependentCounts};

/// In-memory category store for tests and local development.
///
/// Dependent counts are not derived from other stores; seed them with
/// [`InMemoryCategoryRepository::set_dependent_counts`] when a scenario needs
/// them.
pub struct InMemoryCategoryRepository {
    categories: RwLock<HashMap<i32, Category>>,
    dependents: RwLock<HashMap<i32, DependentCounts>>,
    next_id: AtomicI32,
}

impl Default for InMemoryCategoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self {
            categories: RwLock::new(HashMap::new()),
            dependents: RwLock::new(HashMap::new()),
            next_id: AtomicI32::new(1),
        }
    }

    pub async fn set_dependent_counts(&self, category_id: i32, counts: DependentCounts) {
        self.dependents.write().await.insert(category_id, counts);
    }

    fn sorted(mut categories: Vec<Category>) -> Vec<Category> {
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        categories
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn get_by_id(&self, id: i32) -> Result<Option<Category>> {
        Ok(self.categories.read().await.get(&id).cloned())
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Category>> {
        let categories = self.categories.read().await;
        Ok(Self::sorted(
            categories
                .values()
                .filter(|c| c.user_id == user_id)
                .cloned()
                .collect(),
        ))
    }

    async fn list_active_by_user(&self, user_id: &str) -> Result<Vec<Category>> {
        let categories = self.categories.read().await;
        Ok(Self::sorted(
            categories
                .values()
                .filter(|c| c.user_id == user_id && c.is_active)
                .cloned()
                .collect(),
        ))
    }

    async fn list_roots_by_user(&self, user_id: &str) -> Result<Vec<Category>> {
        let categories = self.categories.read().await;
        Ok(Self::sorted(
            categories
                .values()
                .filter(|c| c.user_id == user_id && c.parent_category_id.is_none())
                .cloned()
                .collect(),
        ))
    }

    async fn list_children(&self, parent_category_id: i32) -> Result<Vec<Category>> {
        let categories = self.categories.read().await;
        Ok(Self::sorted(
            categories
                .values()
                .filter(|c| c.parent_category_id == Some(parent_category_id))
                .cloned()
                .collect(),
        ))
    }

    async fn dependent_counts(&self, category_id: i32) -> Result<DependentCounts> {
        Ok(self
            .dependents
            .read()
            .await
            .get(&category_id)
            .copied()
            .unwrap_or_default())
    }

    async fn insert(&self, mut category: Category) -> Result<Category> {
        let mut categories = self.categories.write().await;
        if categories
            .values()
            .any(|c| c.user_id == category.user_id && c.name == category.name)
        {
            return Err(AppError::Conflict(
                "A category with this name already exists for this user.".to_string(),
            ));
        }
        category.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn update(&self, category: &Category) -> Result<()> {
        let mut categories = self.categories.write().await;
        match categories.get_mut(&category.id) {
            Some(existing) => {
                *existing = category.clone();
                Ok(())
            }
            None => Err(AppError::NotFound(format!(
                "Category with ID {} not found.",
                category.id
            ))),
        }
    }

    async fn delete(&self, id: i32) -> Result<()> {
        match self.categories.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(format!(
                "Category with ID {} not found.",
                id
            ))),
        }
    }
}
