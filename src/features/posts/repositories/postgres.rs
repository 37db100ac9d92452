use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::posts::models::Post;
use crate::features::posts::repositories::PostRepository;

/// Postgres-backed post store.
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// The unique index on slug backstops concurrent creates that race past the
/// service-level uniqueness pre-check.
fn handle_db_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.code() == Some(std::borrow::Cow::Borrowed("23505")) {
            return AppError::Conflict("A post with this slug already exists.".to_string());
        }
        if db_err.code() == Some(std::borrow::Cow::Borrowed("23503")) {
            return AppError::Validation("Referenced category does not exist.".to_string());
        }
    }
    AppError::Database(e)
}

/// Escape ILIKE wildcards so user queries stay literal substrings.
fn like_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

const SELECT_COLUMNS: &str = "SELECT id, author_id, category_id, title, slug, content_body, \
                              featured_image_url, meta_description, publication_date, \
                              is_published, created_by, created_at, modified_by, modified_at \
                              FROM posts";

const VISIBLE: &str = "is_published = TRUE AND publication_date IS NOT NULL \
                       AND publication_date <= NOW()";

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn get_by_id(&self, id: i32) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(post)
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(&format!("{} WHERE slug = $1", SELECT_COLUMNS))
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(post)
    }

    async fn list_published(&self) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(&format!(
            "{} WHERE {} ORDER BY publication_date DESC",
            SELECT_COLUMNS, VISIBLE
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;
        Ok(posts)
    }

    async fn list_published_by_category(&self, category_id: i32) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(&format!(
            "{} WHERE {} AND category_id = $1 ORDER BY publication_date DESC",
            SELECT_COLUMNS, VISIBLE
        ))
        .bind(category_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;
        Ok(posts)
    }

    async fn list_published_by_categories(&self, category_ids: &[i32]) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(&format!(
            "{} WHERE {} AND category_id = ANY($1) ORDER BY publication_date DESC",
            SELECT_COLUMNS, VISIBLE
        ))
        .bind(category_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;
        Ok(posts)
    }

    async fn list_recent_published(&self, count: i64) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(&format!(
            "{} WHERE {} ORDER BY publication_date DESC LIMIT $1",
            SELECT_COLUMNS, VISIBLE
        ))
        .bind(count)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;
        Ok(posts)
    }

    async fn list_recent_published_by_category(
        &self,
        category_id: i32,
        count: i64,
    ) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(&format!(
            "{} WHERE {} AND category_id = $1 ORDER BY publication_date DESC LIMIT $2",
            SELECT_COLUMNS, VISIBLE
        ))
        .bind(category_id)
        .bind(count)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;
        Ok(posts)
    }

    async fn list_by_author(&self, author_id: &str) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(&format!(
            "{} WHERE author_id = $1 ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .bind(author_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;
        Ok(posts)
    }

    async fn list_drafts_by_author(&self, author_id: &str) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(&format!(
            "{} WHERE author_id = $1 AND is_published = FALSE ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .bind(author_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;
        Ok(posts)
    }

    async fn search_published(&self, query: &str, limit: i64) -> Result<Vec<Post>> {
        let pattern = like_pattern(query);
        let posts = sqlx::query_as::<_, Post>(&format!(
            "{} WHERE {} AND (title ILIKE $1 OR slug ILIKE $1 \
             OR meta_description ILIKE $1 OR content_body ILIKE $1) \
             ORDER BY publication_date DESC LIMIT $2",
            SELECT_COLUMNS, VISIBLE
        ))
        .bind(&pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;
        Ok(posts)
    }

    async fn slug_exists(&self, slug: &str, exclude_id: Option<i32>) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM posts WHERE slug = $1 AND ($2::int IS NULL OR id <> $2))",
        )
        .bind(slug)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;
        Ok(exists)
    }

    async fn insert(&self, post: Post) -> Result<Post> {
        let created = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (
                author_id, category_id, title, slug, content_body, featured_image_url,
                meta_description, publication_date, is_published,
                created_by, created_at, modified_by, modified_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING id, author_id, category_id, title, slug, content_body,
                      featured_image_url, meta_description, publication_date,
                      is_published, created_by, created_at, modified_by, modified_at
            "#,
        )
        .bind(&post.author_id)
        .bind(post.category_id)
        .bind(&post.title)
        .bind(&post.slug)
        .bind(&post.content_body)
        .bind(&post.featured_image_url)
        .bind(&post.meta_description)
        .bind(post.publication_date)
        .bind(post.is_published)
        .bind(&post.audit.created_by)
        .bind(post.audit.created_at)
        .bind(&post.audit.modified_by)
        .bind(post.audit.modified_at)
        .fetch_one(&self.pool)
        .await
        .map_err(handle_db_error)?;

        Ok(created)
    }

    async fn update(&self, post: &Post) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET category_id = $1,
                title = $2,
                slug = $3,
                content_body = $4,
                featured_image_url = $5,
                meta_description = $6,
                publication_date = $7,
                is_published = $8,
                modified_by = $9,
                modified_at = $10
            WHERE id = $11
            "#,
        )
        .bind(post.category_id)
        .bind(&post.title)
        .bind(&post.slug)
        .bind(&post.content_body)
        .bind(&post.featured_image_url)
        .bind(&post.meta_description)
        .bind(post.publication_date)
        .bind(post.is_published)
        .bind(&post.audit.modified_by)
        .bind(post.audit.modified_at)
        .bind(post.id)
        .execute(&self.pool)
        .await
        .map_err(handle_db_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Post with ID {} not found.",
                post.id
            )));
        }

        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<()> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Post with ID {} not found.", id)));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("budget"), "%budget%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern(r"a\b"), "%a\\\\b%");
    }
}
