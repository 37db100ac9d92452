use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::lead_magnets::models::LeadMagnet;
use crate::features::lead_magnets::repositories::LeadMagnetRepository;

/// Postgres-backed lead magnet store.
pub struct PgLeadMagnetRepository {
    pool: PgPool,
}

impl PgLeadMagnetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn handle_db_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.code() == Some(std::borrow::Cow::Borrowed("23503")) {
            return AppError::Validation("Referenced category does not exist.".to_string());
        }
    }
    AppError::Database(e)
}

const SELECT_COLUMNS: &str = "SELECT lm.id, lm.category_id, lm.title, lm.form_action_url, \
                              lm.download_file_url, lm.is_active, lm.created_by, lm.created_at, \
                              lm.modified_by, lm.modified_at FROM lead_magnets lm";

#[async_trait]
impl LeadMagnetRepository for PgLeadMagnetRepository {
    async fn get_by_id(&self, id: i32) -> Result<Option<LeadMagnet>> {
        let lead_magnet =
            sqlx::query_as::<_, LeadMagnet>(&format!("{} WHERE lm.id = $1", SELECT_COLUMNS))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(AppError::Database)?;
        Ok(lead_magnet)
    }

    async fn list_by_category(&self, category_id: i32) -> Result<Vec<LeadMagnet>> {
        let lead_magnets = sqlx::query_as::<_, LeadMagnet>(&format!(
            "{} WHERE lm.category_id = $1 ORDER BY lm.title",
            SELECT_COLUMNS
        ))
        .bind(category_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;
        Ok(lead_magnets)
    }

    async fn list_active_by_category(&self, category_id: i32) -> Result<Vec<LeadMagnet>> {
        let lead_magnets = sqlx::query_as::<_, LeadMagnet>(&format!(
            "{} WHERE lm.category_id = $1 AND lm.is_active = TRUE ORDER BY lm.title",
            SELECT_COLUMNS
        ))
        .bind(category_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;
        Ok(lead_magnets)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<LeadMagnet>> {
        let lead_magnets = sqlx::query_as::<_, LeadMagnet>(&format!(
            "{} JOIN categories c ON c.id = lm.category_id \
             WHERE c.user_id = $1 ORDER BY lm.title",
            SELECT_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;
        Ok(lead_magnets)
    }

    async fn list_active_by_user(&self, user_id: &str) -> Result<Vec<LeadMagnet>> {
        let lead_magnets = sqlx::query_as::<_, LeadMagnet>(&format!(
            "{} JOIN categories c ON c.id = lm.category_id \
             WHERE c.user_id = $1 AND lm.is_active = TRUE ORDER BY lm.title",
            SELECT_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;
        Ok(lead_magnets)
    }

    async fn insert(&self, lead_magnet: LeadMagnet) -> Result<LeadMagnet> {
        let created = sqlx::query_as::<_, LeadMagnet>(
            r#"
            INSERT INTO lead_magnets (
                category_id, title, form_action_url, download_file_url, is_active,
                created_by, created_at, modified_by, modified_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, category_id, title, form_action_url, download_file_url,
                      is_active, created_by, created_at, modified_by, modified_at
            "#,
        )
        .bind(lead_magnet.category_id)
        .bind(&lead_magnet.title)
        .bind(&lead_magnet.form_action_url)
        .bind(&lead_magnet.download_file_url)
        .bind(lead_magnet.is_active)
        .bind(&lead_magnet.audit.created_by)
        .bind(lead_magnet.audit.created_at)
        .bind(&lead_magnet.audit.modified_by)
        .bind(lead_magnet.audit.modified_at)
        .fetch_one(&self.pool)
        .await
        .map_err(handle_db_error)?;

        Ok(created)
    }

    async fn update(&self, lead_magnet: &LeadMagnet) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE lead_magnets
            SET category_id = $1,
                title = $2,
                form_action_url = $3,
                download_file_url = $4,
                is_active = $5,
                modified_by = $6,
                modified_at = $7
            WHERE id = $8
            "#,
        )
        .bind(lead_magnet.category_id)
        .bind(&lead_magnet.title)
        .bind(&lead_magnet.form_action_url)
        .bind(&lead_magnet.download_file_url)
        .bind(lead_magnet.is_active)
        .bind(&lead_magnet.audit.modified_by)
        .bind(lead_magnet.audit.modified_at)
        .bind(lead_magnet.id)
        .execute(&self.pool)
        .await
        .map_err(handle_db_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Lead magnet with ID {} not found.",
                lead_magnet.id
            )));
        }

        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<()> {
        let result = sqlx::query("DELETE FROM lead_magnets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Lead magnet with ID {} not found.",
                id
            )));
        }

        Ok(())
    }
}
