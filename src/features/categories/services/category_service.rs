use std::sync::Arc;

use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{
    CategoryResponseDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::models::Category;
use crate::features::categories::repositories::{CategoryRepository, DependentCounts};
use crate::features::categories::validation;
use crate::shared::audit::Audit;
use crate::shared::constants::CATEGORY_MAX_DEPTH;
use crate::shared::ownership::authorize;
use crate::shared::sanitize::Sanitizer;

/// Service for managing user-owned category hierarchies.
pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
    sanitizer: Arc<Sanitizer>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryRepository>, sanitizer: Arc<Sanitizer>) -> Self {
        Self {
            categories,
            sanitizer,
        }
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<CategoryResponseDto>> {
        let category = self.categories.get_by_id(id).await?;
        Ok(category.map(|c| c.into()))
    }

    pub async fn list_by_user(&self, user_id: &str) -> Result<Vec<CategoryResponseDto>> {
        let categories = self.categories.list_by_user(user_id).await?;
        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    pub async fn list_active_by_user(&self, user_id: &str) -> Result<Vec<CategoryResponseDto>> {
        let categories = self.categories.list_active_by_user(user_id).await?;
        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    pub async fn list_roots_by_user(&self, user_id: &str) -> Result<Vec<CategoryResponseDto>> {
        let categories = self.categories.list_roots_by_user(user_id).await?;
        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    pub async fn list_children(&self, parent_category_id: i32) -> Result<Vec<CategoryResponseDto>> {
        let categories = self.categories.list_children(parent_category_id).await?;
        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    /// Posts and lead magnets still referencing the category; lets a front
    /// end warn before offering deletion.
    pub async fn dependent_counts(&self, id: i32) -> Result<DependentCounts> {
        self.categories
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category with ID {} not found.", id)))?;

        self.categories.dependent_counts(id).await
    }

    pub async fn create(
        &self,
        dto: CreateCategoryDto,
        requester_id: &str,
    ) -> Result<CategoryResponseDto> {
        dto.validate()?;

        authorize(&dto.user_id, requester_id, "Category")?;

        // Parent must exist and share the owner
        if let Some(parent_id) = dto.parent_category_id {
            let parent = self
                .categories
                .get_by_id(parent_id)
                .await?
                .ok_or_else(|| AppError::Validation("Parent category not found.".to_string()))?;

            authorize(&parent.user_id, &dto.user_id, "Parent category")?;
        }

        let category = Category {
            id: 0,
            name: self.sanitizer.clean(&dto.name),
            description: self.sanitizer.clean_opt(dto.description),
            color: dto.color,
            user_id: dto.user_id,
            parent_category_id: dto.parent_category_id,
            is_active: dto.is_active,
            audit: Audit::created(requester_id),
        };

        let created = self.categories.insert(category).await?;

        tracing::info!(
            "Category created: id={}, user={}",
            created.id,
            created.user_id
        );

        Ok(created.into())
    }

    pub async fn update(
        &self,
        dto: UpdateCategoryDto,
        requester_id: &str,
    ) -> Result<CategoryResponseDto> {
        if dto.id <= 0 {
            return Err(AppError::Validation(
                "Category ID is required for update.".to_string(),
            ));
        }

        dto.validate()?;

        let mut existing = self
            .categories
            .get_by_id(dto.id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category with ID {} not found.", dto.id)))?;

        authorize(&existing.user_id, &dto.user_id, "Category")?;
        authorize(&existing.user_id, requester_id, "Category")?;

        if let Some(parent_id) = dto.parent_category_id {
            validation::validate_parent_reference(dto.id, Some(parent_id))?;

            let parent = self
                .categories
                .get_by_id(parent_id)
                .await?
                .ok_or_else(|| AppError::Validation("Parent category not found.".to_string()))?;

            authorize(&parent.user_id, &dto.user_id, "Parent category")?;

            self.ensure_no_cycle(dto.id, &parent).await?;
        }

        existing.name = self.sanitizer.clean(&dto.name);
        existing.description = self.sanitizer.clean_opt(dto.description);
        existing.color = dto.color;
        existing.parent_category_id = dto.parent_category_id;
        existing.is_active = dto.is_active;
        existing.audit.touch(requester_id);

        self.categories.update(&existing).await?;

        tracing::info!("Category updated: id={}", existing.id);

        Ok(existing.into())
    }

    pub async fn delete(&self, id: i32, requester_id: &str) -> Result<()> {
        let category = self
            .categories
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category with ID {} not found.", id)))?;

        authorize(&category.user_id, requester_id, "Category")?;

        let children = self.categories.list_children(id).await?;
        if !children.is_empty() {
            return Err(AppError::Conflict(
                "Cannot delete category that has child categories. \
                 Please delete or reassign child categories first."
                    .to_string(),
            ));
        }

        self.categories.delete(id).await?;

        tracing::info!("Category deleted: id={}, user={}", id, category.user_id);

        Ok(())
    }

    pub async fn soft_delete(&self, id: i32, requester_id: &str) -> Result<()> {
        let mut category = self
            .categories
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category with ID {} not found.", id)))?;

        authorize(&category.user_id, requester_id, "Category")?;

        category.is_active = false;
        category.audit.touch(requester_id);

        self.categories.update(&category).await?;

        tracing::info!("Category deactivated: id={}", id);

        Ok(())
    }

    /// Walk the ancestor chain of the proposed parent; if it reaches the
    /// category being re-parented the move would close a cycle.
    async fn ensure_no_cycle(&self, category_id: i32, proposed_parent: &Category) -> Result<()> {
        let mut current = Some(proposed_parent.clone());
        let mut depth = 0usize;

        while let Some(node) = current {
            if node.id == category_id {
                return Err(AppError::Validation(
                    "Cannot set parent category as it would create a circular reference."
                        .to_string(),
                ));
            }

            depth += 1;
            if depth > CATEGORY_MAX_DEPTH {
                return Err(AppError::Validation(
                    "Category hierarchy is too deep.".to_string(),
                ));
            }

            current = match node.parent_category_id {
                Some(parent_id) => self.categories.get_by_id(parent_id).await?,
                None => None,
            };
        }

        Ok(())
    }
}
