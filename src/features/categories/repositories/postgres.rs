use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::Category;
use crate::features::categories::repositories::{CategoryRepository, DependentCounts};

/// Postgres-backed category store.
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Convert database errors to more specific errors; the unique constraint on
/// (user_id, name) backstops concurrent creates.
fn handle_db_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.code() == Some(std::borrow::Cow::Borrowed("23505")) {
            return AppError::Conflict(
                "A category with this name already exists for this user.".to_string(),
            );
        }
        if db_err.code() == Some(std::borrow::Cow::Borrowed("23503")) {
            return AppError::Conflict(
                "Category is still referenced by other records.".to_string(),
            );
        }
    }
    AppError::Database(e)
}

const SELECT_COLUMNS: &str = "SELECT id, name, description, color, user_id, parent_category_id, \
                              is_active, created_by, created_at, modified_by, modified_at \
                              FROM categories";

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn get_by_id(&self, id: i32) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(category)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(&format!(
            "{} WHERE user_id = $1 ORDER BY name",
            SELECT_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;
        Ok(categories)
    }

    async fn list_active_by_user(&self, user_id: &str) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(&format!(
            "{} WHERE user_id = $1 AND is_active = TRUE ORDER BY name",
            SELECT_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;
        Ok(categories)
    }

    async fn list_roots_by_user(&self, user_id: &str) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(&format!(
            "{} WHERE user_id = $1 AND parent_category_id IS NULL ORDER BY name",
            SELECT_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;
        Ok(categories)
    }

    async fn list_children(&self, parent_category_id: i32) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(&format!(
            "{} WHERE parent_category_id = $1 ORDER BY name",
            SELECT_COLUMNS
        ))
        .bind(parent_category_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;
        Ok(categories)
    }

    async fn dependent_counts(&self, category_id: i32) -> Result<DependentCounts> {
        let (posts, lead_magnets) = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM posts WHERE category_id = $1),
                (SELECT COUNT(*) FROM lead_magnets WHERE category_id = $1)
            "#,
        )
        .bind(category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(DependentCounts {
            posts,
            lead_magnets,
        })
    }

    async fn insert(&self, category: Category) -> Result<Category> {
        let created = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (
                name, description, color, user_id, parent_category_id, is_active,
                created_by, created_at, modified_by, modified_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, name, description, color, user_id, parent_category_id,
                      is_active, created_by, created_at, modified_by, modified_at
            "#,
        )
        .bind(&category.name)
        .bind(&category.description)
        .bind(&category.color)
        .bind(&category.user_id)
        .bind(category.parent_category_id)
        .bind(category.is_active)
        .bind(&category.audit.created_by)
        .bind(category.audit.created_at)
        .bind(&category.audit.modified_by)
        .bind(category.audit.modified_at)
        .fetch_one(&self.pool)
        .await
        .map_err(handle_db_error)?;

        Ok(created)
    }

    async fn update(&self, category: &Category) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE categories
            SET name = $1,
                description = $2,
                color = $3,
                parent_category_id = $4,
                is_active = $5,
                modified_by = $6,
                modified_at = $7
            WHERE id = $8
            "#,
        )
        .bind(&category.name)
        .bind(&category.description)
        .bind(&category.color)
        .bind(category.parent_category_id)
        .bind(category.is_active)
        .bind(&category.audit.modified_by)
        .bind(category.audit.modified_at)
        .bind(category.id)
        .execute(&self.pool)
        .await
        .map_err(handle_db_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Category with ID {} not found.",
                category.id
            )));
        }

        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(handle_db_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Category with ID {} not found.",
                id
            )));
        }

        Ok(())
    }
}
