use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::core::config::PostsConfig;
use crate::core::error::{AppError, Result};
use crate::features::categories::repositories::CategoryRepository;
use crate::features::posts::dtos::{CreatePostDto, PostResponseDto, UpdatePostDto};
use crate::features::posts::models::Post;
use crate::features::posts::repositories::PostRepository;
use crate::features::posts::validation::{self, ImageUrlPolicy};
use crate::shared::audit::Audit;
use crate::shared::ownership::authorize;
use crate::shared::sanitize::Sanitizer;

/// Service for managing blog posts and their public visibility.
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    categories: Arc<dyn CategoryRepository>,
    sanitizer: Arc<Sanitizer>,
    image_policy: ImageUrlPolicy,
    config: PostsConfig,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        categories: Arc<dyn CategoryRepository>,
        sanitizer: Arc<Sanitizer>,
        image_policy: ImageUrlPolicy,
        config: PostsConfig,
    ) -> Self {
        Self {
            posts,
            categories,
            sanitizer,
            image_policy,
            config,
        }
    }

    /// Fetch a post by id. Drafts are returned only to their author; any
    /// other requester sees nothing rather than a forbidden error, so the
    /// existence of drafts is not disclosed.
    pub async fn get_by_id(
        &self,
        id: i32,
        requester_id: Option<&str>,
    ) -> Result<Option<PostResponseDto>> {
        let post = self.posts.get_by_id(id).await?;

        Ok(post
            .filter(|p| p.is_published || requester_id == Some(p.author_id.as_str()))
            .map(|p| p.into()))
    }

    /// Fetch a post by slug; only published, currently visible posts are
    /// returned.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<PostResponseDto>> {
        let post = self.posts.get_by_slug(slug).await?;

        Ok(post
            .filter(|p| p.is_visible_at(Utc::now()))
            .map(|p| p.into()))
    }

    pub async fn list_published(&self) -> Result<Vec<PostResponseDto>> {
        let posts = self.posts.list_published().await?;
        Ok(posts.into_iter().map(|p| p.into()).collect())
    }

    pub async fn list_published_by_category(
        &self,
        category_id: i32,
    ) -> Result<Vec<PostResponseDto>> {
        self.require_category(category_id).await?;

        let posts = self.posts.list_published_by_category(category_id).await?;
        Ok(posts.into_iter().map(|p| p.into()).collect())
    }

    /// Posts in the category or any of its direct children (one level of
    /// descendants, matching how category pages aggregate their subtopics).
    pub async fn list_published_by_category_and_descendants(
        &self,
        parent_category_id: i32,
    ) -> Result<Vec<PostResponseDto>> {
        self.require_category(parent_category_id).await?;

        let children = self.categories.list_children(parent_category_id).await?;
        let mut category_ids = vec![parent_category_id];
        category_ids.extend(children.iter().map(|c| c.id));

        let posts = self
            .posts
            .list_published_by_categories(&category_ids)
            .await?;
        Ok(posts.into_iter().map(|p| p.into()).collect())
    }

    pub async fn list_recent_published(&self, count: i64) -> Result<Vec<PostResponseDto>> {
        self.check_recent_count(count)?;

        let posts = self.posts.list_recent_published(count).await?;
        Ok(posts.into_iter().map(|p| p.into()).collect())
    }

    pub async fn list_recent_published_by_category(
        &self,
        category_id: i32,
        count: i64,
    ) -> Result<Vec<PostResponseDto>> {
        self.check_recent_count(count)?;
        self.require_category(category_id).await?;

        let posts = self
            .posts
            .list_recent_published_by_category(category_id, count)
            .await?;
        Ok(posts.into_iter().map(|p| p.into()).collect())
    }

    pub async fn list_by_author(&self, author_id: &str) -> Result<Vec<PostResponseDto>> {
        let posts = self.posts.list_by_author(author_id).await?;
        Ok(posts.into_iter().map(|p| p.into()).collect())
    }

    pub async fn list_drafts_by_author(&self, author_id: &str) -> Result<Vec<PostResponseDto>> {
        let posts = self.posts.list_drafts_by_author(author_id).await?;
        Ok(posts.into_iter().map(|p| p.into()).collect())
    }

    /// Case-insensitive substring search across visible posts; the result
    /// count is capped by configuration. A blank query matches nothing.
    pub async fn search_published(&self, query: &str) -> Result<Vec<PostResponseDto>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let posts = self
            .posts
            .search_published(query, self.config.search_results_cap)
            .await?;
        Ok(posts.into_iter().map(|p| p.into()).collect())
    }

    pub async fn create(&self, dto: CreatePostDto, requester_id: &str) -> Result<PostResponseDto> {
        dto.validate()?;

        validation::validate_slug(&dto.slug)?;

        if self.posts.slug_exists(&dto.slug, None).await? {
            return Err(AppError::Conflict(
                "A post with this slug already exists.".to_string(),
            ));
        }

        authorize(&dto.author_id, requester_id, "Post")?;

        if let Some(category_id) = dto.category_id {
            let category = self
                .categories
                .get_by_id(category_id)
                .await?
                .ok_or_else(|| AppError::Validation("Category not found.".to_string()))?;

            authorize(&category.user_id, &dto.author_id, "Category")?;
        }

        if let Some(image_url) = non_blank(dto.featured_image_url.as_deref()) {
            self.image_policy.validate_featured_image_url(image_url)?;
        }

        let post = Post {
            id: 0,
            author_id: dto.author_id,
            category_id: dto.category_id,
            title: dto.title,
            slug: dto.slug,
            content_body: self.sanitizer.clean_opt(dto.content_body),
            featured_image_url: dto.featured_image_url,
            meta_description: dto.meta_description,
            publication_date: dto.publication_date,
            is_published: dto.is_published,
            audit: Audit::created(requester_id),
        };

        let created = self.posts.insert(post).await?;

        tracing::info!(
            "Post created: id={}, slug={}, author={}",
            created.id,
            created.slug,
            created.author_id
        );

        Ok(created.into())
    }

    pub async fn update(&self, dto: UpdatePostDto, requester_id: &str) -> Result<PostResponseDto> {
        if dto.id <= 0 {
            return Err(AppError::Validation(
                "Post ID is required for update.".to_string(),
            ));
        }

        dto.validate()?;

        validation::validate_slug(&dto.slug)?;

        if self.posts.slug_exists(&dto.slug, Some(dto.id)).await? {
            return Err(AppError::Conflict(
                "A post with this slug already exists.".to_string(),
            ));
        }

        let mut existing = self
            .posts
            .get_by_id(dto.id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post with ID {} not found.", dto.id)))?;

        // The author is immutable and must be the requester
        if existing.author_id != dto.author_id {
            return Err(AppError::Forbidden(
                "Post AuthorId cannot be changed.".to_string(),
            ));
        }
        authorize(&existing.author_id, requester_id, "Post")?;

        if let Some(category_id) = dto.category_id {
            let category = self
                .categories
                .get_by_id(category_id)
                .await?
                .ok_or_else(|| AppError::Validation("Category not found.".to_string()))?;

            authorize(&category.user_id, &dto.author_id, "Category")?;
        }

        if let Some(image_url) = non_blank(dto.featured_image_url.as_deref()) {
            self.image_policy.validate_featured_image_url(image_url)?;
        }

        existing.title = dto.title;
        existing.slug = dto.slug;
        existing.content_body = self.sanitizer.clean_opt(dto.content_body);
        existing.featured_image_url = dto.featured_image_url;
        existing.meta_description = dto.meta_description;
        existing.publication_date = dto.publication_date;
        existing.is_published = dto.is_published;
        existing.category_id = dto.category_id;
        existing.audit.touch(requester_id);

        self.posts.update(&existing).await?;

        tracing::info!("Post updated: id={}, slug={}", existing.id, existing.slug);

        Ok(existing.into())
    }

    pub async fn delete(&self, id: i32, requester_id: &str) -> Result<()> {
        let post = self
            .posts
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post with ID {} not found.", id)))?;

        authorize(&post.author_id, requester_id, "Post")?;

        self.posts.delete(id).await?;

        tracing::info!("Post deleted: id={}, author={}", id, post.author_id);

        Ok(())
    }

    /// Publish the post. An unset or past publication date is bumped to now;
    /// a future date is preserved so scheduled posts stay scheduled.
    pub async fn publish(&self, id: i32, requester_id: &str) -> Result<PostResponseDto> {
        let mut post = self
            .posts
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post with ID {} not found.", id)))?;

        authorize(&post.author_id, requester_id, "Post")?;

        post.is_published = true;

        let now = Utc::now();
        match post.publication_date {
            Some(date) if date >= now => {}
            _ => post.publication_date = Some(now),
        }

        post.audit.touch(requester_id);

        self.posts.update(&post).await?;

        tracing::info!("Post published: id={}, slug={}", post.id, post.slug);

        Ok(post.into())
    }

    pub async fn unpublish(&self, id: i32, requester_id: &str) -> Result<PostResponseDto> {
        let mut post = self
            .posts
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post with ID {} not found.", id)))?;

        authorize(&post.author_id, requester_id, "Post")?;

        post.is_published = false;
        post.audit.touch(requester_id);

        self.posts.update(&post).await?;

        tracing::info!("Post unpublished: id={}, slug={}", post.id, post.slug);

        Ok(post.into())
    }

    async fn require_category(&self, category_id: i32) -> Result<()> {
        self.categories
            .get_by_id(category_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Category with ID {} not found.", category_id))
            })?;
        Ok(())
    }

    fn check_recent_count(&self, count: i64) -> Result<()> {
        if count < self.config.min_recent_count {
            return Err(AppError::Validation(format!(
                "Count must be at least {}.",
                self.config.min_recent_count
            )));
        }
        if count > self.config.max_recent_count {
            return Err(AppError::Validation(format!(
                "Count cannot exceed {}.",
                self.config.max_recent_count
            )));
        }
        Ok(())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::models::Category;
    use crate::features::categories::repositories::InMemoryCategoryRepository;
    use crate::features::posts::repositories::InMemoryPostRepository;
    use chrono::{Duration, Utc};
    use tokio_test::assert_ok;

    struct Fixture {
        service: PostService,
        categories: Arc<InMemoryCategoryRepository>,
    }

    fn fixture() -> Fixture {
        let posts = Arc::new(InMemoryPostRepository::new());
        let categories = Arc::new(InMemoryCategoryRepository::new());
        let service = PostService::new(
            posts,
            categories.clone(),
            Arc::new(Sanitizer::default()),
            ImageUrlPolicy::default(),
            PostsConfig::default(),
        );
        Fixture {
            service,
            categories,
        }
    }

    async fn seed_category(fixture: &Fixture, name: &str, user_id: &str) -> Category {
        fixture
            .categories
            .insert(Category {
                id: 0,
                name: name.to_string(),
                description: None,
                color: None,
                user_id: user_id.to_string(),
                parent_category_id: None,
                is_active: true,
                audit: Audit::created(user_id),
            })
            .await
            .unwrap()
    }

    fn create_dto(title: &str, slug: &str, author_id: &str) -> CreatePostDto {
        CreatePostDto {
            author_id: author_id.to_string(),
            category_id: None,
            title: title.to_string(),
            slug: slug.to_string(),
            content_body: None,
            featured_image_url: None,
            meta_description: None,
            publication_date: None,
            is_published: false,
        }
    }

    fn update_dto(existing: &PostResponseDto) -> UpdatePostDto {
        UpdatePostDto {
            id: existing.id,
            author_id: existing.author_id.clone(),
            category_id: existing.category_id,
            title: existing.title.clone(),
            slug: existing.slug.clone(),
            content_body: existing.content_body.clone(),
            featured_image_url: existing.featured_image_url.clone(),
            meta_description: existing.meta_description.clone(),
            publication_date: existing.publication_date,
            is_published: existing.is_published,
        }
    }

    #[tokio::test]
    async fn create_rejects_bad_slug_with_format_message() {
        let fixture = fixture();
        let err = fixture
            .service
            .create(create_dto("Title", "Bad Slug", "user-1"), "user-1")
            .await
            .unwrap_err();

        match err {
            AppError::Validation(msg) => assert!(msg.contains("URL-friendly")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn duplicate_slug_conflicts() {
        let fixture = fixture();
        assert_ok!(
            fixture
                .service
                .create(create_dto("First", "budgeting", "user-1"), "user-1")
                .await
        );

        let err = fixture
            .service
            .create(create_dto("Second", "budgeting", "user-1"), "user-1")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_keeping_own_slug_succeeds() {
        let fixture = fixture();
        let post = fixture
            .service
            .create(create_dto("First", "budgeting", "user-1"), "user-1")
            .await
            .unwrap();

        let mut dto = update_dto(&post);
        dto.title = "First, revised".to_string();

        let updated = fixture.service.update(dto, "user-1").await.unwrap();

        assert_eq!(updated.slug, "budgeting");
        assert_eq!(updated.title, "First, revised");
    }

    #[tokio::test]
    async fn update_to_another_posts_slug_conflicts() {
        let fixture = fixture();
        fixture
            .service
            .create(create_dto("First", "budgeting", "user-1"), "user-1")
            .await
            .unwrap();
        let second = fixture
            .service
            .create(create_dto("Second", "saving", "user-1"), "user-1")
            .await
            .unwrap();

        let mut dto = update_dto(&second);
        dto.slug = "budgeting".to_string();

        let err = fixture.service.update(dto, "user-1").await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn author_cannot_be_changed_on_update() {
        let fixture = fixture();
        let post = fixture
            .service
            .create(create_dto("First", "budgeting", "user-1"), "user-1")
            .await
            .unwrap();

        let mut dto = update_dto(&post);
        dto.author_id = "user-2".to_string();

        let err = fixture.service.update(dto, "user-2").await.unwrap_err();

        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn create_requires_author_to_match_requester() {
        let fixture = fixture();
        let err = fixture
            .service
            .create(create_dto("First", "budgeting", "user-1"), "user-2")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn create_rejects_category_owned_by_other_user() {
        let fixture = fixture();
        let category = seed_category(&fixture, "Finance", "user-2").await;

        let mut dto = create_dto("First", "budgeting", "user-1");
        dto.category_id = Some(category.id);

        let err = fixture.service.create(dto, "user-1").await.unwrap_err();

        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn create_sanitizes_content_body() {
        let fixture = fixture();
        let mut dto = create_dto("First", "budgeting", "user-1");
        dto.content_body = Some("<script>alert(1)</script>Hello".to_string());

        let created = fixture.service.create(dto, "user-1").await.unwrap();

        assert_eq!(created.content_body.as_deref(), Some("Hello"));
    }

    #[tokio::test]
    async fn create_rejects_disallowed_image_url() {
        let fixture = fixture();
        let mut dto = create_dto("First", "budgeting", "user-1");
        dto.featured_image_url = Some("http://insecure.example/a.png".to_string());

        let err = fixture.service.create(dto, "user-1").await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn drafts_are_visible_only_to_their_author() {
        let fixture = fixture();
        let draft = fixture
            .service
            .create(create_dto("Draft", "draft-post", "user-1"), "user-1")
            .await
            .unwrap();

        let as_author = fixture
            .service
            .get_by_id(draft.id, Some("user-1"))
            .await
            .unwrap();
        let as_other = fixture
            .service
            .get_by_id(draft.id, Some("user-2"))
            .await
            .unwrap();
        let anonymous = fixture.service.get_by_id(draft.id, None).await.unwrap();

        assert!(as_author.is_some());
        assert!(as_other.is_none());
        assert!(anonymous.is_none());
    }

    #[tokio::test]
    async fn get_by_slug_hides_future_and_draft_posts() {
        let fixture = fixture();
        let mut scheduled = create_dto("Scheduled", "scheduled-post", "user-1");
        scheduled.is_published = true;
        scheduled.publication_date = Some(Utc::now() + Duration::hours(1));
        fixture.service.create(scheduled, "user-1").await.unwrap();

        fixture
            .service
            .create(create_dto("Draft", "draft-post", "user-1"), "user-1")
            .await
            .unwrap();

        let mut live = create_dto("Live", "live-post", "user-1");
        live.is_published = true;
        live.publication_date = Some(Utc::now() - Duration::hours(1));
        fixture.service.create(live, "user-1").await.unwrap();

        assert!(fixture
            .service
            .get_by_slug("scheduled-post")
            .await
            .unwrap()
            .is_none());
        assert!(fixture
            .service
            .get_by_slug("draft-post")
            .await
            .unwrap()
            .is_none());
        assert!(fixture
            .service
            .get_by_slug("live-post")
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn publish_sets_unset_date_to_now() {
        let fixture = fixture();
        let draft = fixture
            .service
            .create(create_dto("Draft", "draft-post", "user-1"), "user-1")
            .await
            .unwrap();

        let before = Utc::now();
        let published = fixture.service.publish(draft.id, "user-1").await.unwrap();
        let after = Utc::now();

        assert!(published.is_published);
        let date = published.publication_date.unwrap();
        assert!(date >= before && date <= after);
    }

    #[tokio::test]
    async fn publish_bumps_past_date_to_now() {
        let fixture = fixture();
        let mut dto = create_dto("Old", "old-post", "user-1");
        dto.publication_date = Some(Utc::now() - Duration::days(7));
        let post = fixture.service.create(dto, "user-1").await.unwrap();

        let before = Utc::now();
        let published = fixture.service.publish(post.id, "user-1").await.unwrap();

        assert!(published.publication_date.unwrap() >= before);
    }

    #[tokio::test]
    async fn publish_preserves_future_date() {
        let fixture = fixture();
        let future = Utc::now() + Duration::days(3);
        let mut dto = create_dto("Scheduled", "scheduled-post", "user-1");
        dto.publication_date = Some(future);
        let post = fixture.service.create(dto, "user-1").await.unwrap();

        let published = fixture.service.publish(post.id, "user-1").await.unwrap();

        assert!(published.is_published);
        assert_eq!(published.publication_date, Some(future));
    }

    #[tokio::test]
    async fn unpublish_clears_flag_and_stamps() {
        let fixture = fixture();
        let post = fixture
            .service
            .create(create_dto("Live", "live-post", "user-1"), "user-1")
            .await
            .unwrap();
        fixture.service.publish(post.id, "user-1").await.unwrap();

        let unpublished = fixture.service.unpublish(post.id, "user-1").await.unwrap();

        assert!(!unpublished.is_published);
        assert_eq!(unpublished.audit.modified_by.as_deref(), Some("user-1"));
    }

    #[tokio::test]
    async fn publish_by_non_author_is_forbidden() {
        let fixture = fixture();
        let post = fixture
            .service
            .create(create_dto("Draft", "draft-post", "user-1"), "user-1")
            .await
            .unwrap();

        let err = fixture.service.publish(post.id, "user-2").await.unwrap_err();

        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn recent_count_bounds_are_enforced() {
        let fixture = fixture();

        let too_small = fixture.service.list_recent_published(0).await.unwrap_err();
        let too_large = fixture
            .service
            .list_recent_published(101)
            .await
            .unwrap_err();

        assert!(matches!(too_small, AppError::Validation(_)));
        assert!(matches!(too_large, AppError::Validation(_)));
        assert_ok!(fixture.service.list_recent_published(5).await);
    }

    #[tokio::test]
    async fn category_and_descendants_cover_one_level() {
        let fixture = fixture();
        let parent = seed_category(&fixture, "Finance", "user-1").await;
        let child = fixture
            .categories
            .insert(Category {
                id: 0,
                name: "Investing".to_string(),
                description: None,
                color: None,
                user_id: "user-1".to_string(),
                parent_category_id: Some(parent.id),
                is_active: true,
                audit: Audit::created("user-1"),
            })
            .await
            .unwrap();

        for (i, category_id) in [parent.id, child.id].into_iter().enumerate() {
            let mut dto = create_dto(
                &format!("Post {}", i),
                &format!("post-{}", i),
                "user-1",
            );
            dto.category_id = Some(category_id);
            dto.is_published = true;
            dto.publication_date = Some(Utc::now() - Duration::hours(1));
            fixture.service.create(dto, "user-1").await.unwrap();
        }

        let posts = fixture
            .service
            .list_published_by_category_and_descendants(parent.id)
            .await
            .unwrap();

        assert_eq!(posts.len(), 2);

        let missing = fixture
            .service
            .list_published_by_category_and_descendants(999)
            .await
            .unwrap_err();
        assert!(matches!(missing, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn search_is_case_insensitive_and_skips_drafts() {
        let fixture = fixture();

        let mut live = create_dto("Monthly Budget Guide", "budget-guide", "user-1");
        live.is_published = true;
        live.publication_date = Some(Utc::now() - Duration::hours(1));
        live.content_body = Some("How to track spending".to_string());
        fixture.service.create(live, "user-1").await.unwrap();

        let mut draft = create_dto("Budget Draft", "budget-draft", "user-1");
        draft.content_body = Some("budget notes".to_string());
        fixture.service.create(draft, "user-1").await.unwrap();

        let by_title = fixture.service.search_published("BUDGET").await.unwrap();
        let by_body = fixture.service.search_published("spending").await.unwrap();
        let blank = fixture.service.search_published("   ").await.unwrap();

        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].slug, "budget-guide");
        assert_eq!(by_body.len(), 1);
        assert!(blank.is_empty());
    }

    #[tokio::test]
    async fn drafts_listing_returns_only_drafts() {
        let fixture = fixture();
        fixture
            .service
            .create(create_dto("Draft", "draft-post", "user-1"), "user-1")
            .await
            .unwrap();

        let mut live = create_dto("Live", "live-post", "user-1");
        live.is_published = true;
        live.publication_date = Some(Utc::now() - Duration::hours(1));
        fixture.service.create(live, "user-1").await.unwrap();

        let drafts = fixture.service.list_drafts_by_author("user-1").await.unwrap();
        let all = fixture.service.list_by_author("user-1").await.unwrap();

        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].slug, "draft-post");
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn delete_requires_ownership() {
        let fixture = fixture();
        let post = fixture
            .service
            .create(create_dto("First", "budgeting", "user-1"), "user-1")
            .await
            .unwrap();

        let err = fixture.service.delete(post.id, "user-2").await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        assert_ok!(fixture.service.delete(post.id, "user-1").await);
        assert!(fixture
            .service
            .get_by_id(post.id, Some("user-1"))
            .await
            .unwrap()
            .is_none());
    }
}
