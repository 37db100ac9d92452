use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::core::error::{AppError, Result};
use crate::features::posts::models::Post;
use crate::features::posts::repositories::PostRepository;

/// In-memory post store for tests and local development.
pub struct InMemoryPostRepository {
    posts: RwLock<HashMap<i32, Post>>,
    next_id: AtomicI32,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(HashMap::new()),
            next_id: AtomicI32::new(1),
        }
    }

    fn newest_first(mut posts: Vec<Post>) -> Vec<Post> {
        posts.sort_by(|a, b| b.publication_date.cmp(&a.publication_date));
        posts
    }

    fn newest_created_first(mut posts: Vec<Post>) -> Vec<Post> {
        posts.sort_by(|a, b| b.audit.created_at.cmp(&a.audit.created_at));
        posts
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn get_by_id(&self, id: i32) -> Result<Option<Post>> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Post>> {
        let posts = self.posts.read().await;
        Ok(posts.values().find(|p| p.slug == slug).cloned())
    }

    async fn list_published(&self) -> Result<Vec<Post>> {
        let now = Utc::now();
        let posts = self.posts.read().await;
        Ok(Self::newest_first(
            posts
                .values()
                .filter(|p| p.is_visible_at(now))
                .cloned()
                .collect(),
        ))
    }

    async fn list_published_by_category(&self, category_id: i32) -> Result<Vec<Post>> {
        let now = Utc::now();
        let posts = self.posts.read().await;
        Ok(Self::newest_first(
            posts
                .values()
                .filter(|p| p.is_visible_at(now) && p.category_id == Some(category_id))
                .cloned()
                .collect(),
        ))
    }

    async fn list_published_by_categories(&self, category_ids: &[i32]) -> Result<Vec<Post>> {
        let now = Utc::now();
        let posts = self.posts.read().await;
        Ok(Self::newest_first(
            posts
                .values()
                .filter(|p| {
                    p.is_visible_at(now)
                        && p.category_id
                            .map(|id| category_ids.contains(&id))
                            .unwrap_or(false)
                })
                .cloned()
                .collect(),
        ))
    }

    async fn list_recent_published(&self, count: i64) -> Result<Vec<Post>> {
        let mut posts = self.list_published().await?;
        posts.truncate(count.max(0) as usize);
        Ok(posts)
    }

    async fn list_recent_published_by_category(
        &self,
        category_id: i32,
        count: i64,
    ) -> Result<Vec<Post>> {
        let mut posts = self.list_published_by_category(category_id).await?;
        posts.truncate(count.max(0) as usize);
        Ok(posts)
    }

    async fn list_by_author(&self, author_id: &str) -> Result<Vec<Post>> {
        let posts = self.posts.read().await;
        Ok(Self::newest_created_first(
            posts
                .values()
                .filter(|p| p.author_id == author_id)
                .cloned()
                .collect(),
        ))
    }

    async fn list_drafts_by_author(&self, author_id: &str) -> Result<Vec<Post>> {
        let posts = self.posts.read().await;
        Ok(Self::newest_created_first(
            posts
                .values()
                .filter(|p| p.author_id == author_id && !p.is_published)
                .cloned()
                .collect(),
        ))
    }

    async fn search_published(&self, query: &str, limit: i64) -> Result<Vec<Post>> {
        let needle = query.to_lowercase();
        let matches = |field: &Option<String>| {
            field
                .as_ref()
                .map(|v| v.to_lowercase().contains(&needle))
                .unwrap_or(false)
        };

        let now = Utc::now();
        let posts = self.posts.read().await;
        let mut found: Vec<Post> = posts
            .values()
            .filter(|p| {
                p.is_visible_at(now)
                    && (p.title.to_lowercase().contains(&needle)
                        || p.slug.to_lowercase().contains(&needle)
                        || matches(&p.meta_description)
                        || matches(&p.content_body))
            })
            .cloned()
            .collect();
        found = Self::newest_first(found);
        found.truncate(limit.max(0) as usize);
        Ok(found)
    }

    async fn slug_exists(&self, slug: &str, exclude_id: Option<i32>) -> Result<bool> {
        let posts = self.posts.read().await;
        Ok(posts
            .values()
            .any(|p| p.slug == slug && Some(p.id) != exclude_id))
    }

    async fn insert(&self, mut post: Post) -> Result<Post> {
        let mut posts = self.posts.write().await;
        if posts.values().any(|p| p.slug == post.slug) {
            return Err(AppError::Conflict(
                "A post with this slug already exists.".to_string(),
            ));
        }
        post.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, post: &Post) -> Result<()> {
        let mut posts = self.posts.write().await;
        match posts.get_mut(&post.id) {
            Some(existing) => {
                *existing = post.clone();
                Ok(())
            }
            None => Err(AppError::NotFound(format!(
                "Post with ID {} not found.",
                post.id
            ))),
        }
    }

    async fn delete(&self, id: i32) -> Result<()> {
        match self.posts.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(format!("Post with ID {} not found.", id))),
        }
    }
}
