use std::sync::Arc;

use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::Category;
use crate::features::categories::repositories::CategoryRepository;
use crate::features::lead_magnets::dtos::{
    CreateLeadMagnetDto, LeadMagnetResponseDto, UpdateLeadMagnetDto,
};
use crate::features::lead_magnets::models::LeadMagnet;
use crate::features::lead_magnets::repositories::LeadMagnetRepository;
use crate::features::lead_magnets::validation;
use crate::shared::audit::Audit;
use crate::shared::ownership::authorize;
use crate::shared::sanitize::Sanitizer;

/// Service for managing lead magnets; ownership flows through the category.
pub struct LeadMagnetService {
    lead_magnets: Arc<dyn LeadMagnetRepository>,
    categories: Arc<dyn CategoryRepository>,
    sanitizer: Arc<Sanitizer>,
}

impl LeadMagnetService {
    pub fn new(
        lead_magnets: Arc<dyn LeadMagnetRepository>,
        categories: Arc<dyn CategoryRepository>,
        sanitizer: Arc<Sanitizer>,
    ) -> Self {
        Self {
            lead_magnets,
            categories,
            sanitizer,
        }
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<LeadMagnetResponseDto>> {
        let lead_magnet = self.lead_magnets.get_by_id(id).await?;
        Ok(lead_magnet.map(|lm| lm.into()))
    }

    pub async fn list_by_category(&self, category_id: i32) -> Result<Vec<LeadMagnetResponseDto>> {
        validation::validate_category_id(category_id)?;

        let lead_magnets = self.lead_magnets.list_by_category(category_id).await?;
        Ok(lead_magnets.into_iter().map(|lm| lm.into()).collect())
    }

    pub async fn list_active_by_category(
        &self,
        category_id: i32,
    ) -> Result<Vec<LeadMagnetResponseDto>> {
        validation::validate_category_id(category_id)?;

        let lead_magnets = self.lead_magnets.list_active_by_category(category_id).await?;
        Ok(lead_magnets.into_iter().map(|lm| lm.into()).collect())
    }

    pub async fn list_by_user(&self, user_id: &str) -> Result<Vec<LeadMagnetResponseDto>> {
        let lead_magnets = self.lead_magnets.list_by_user(user_id).await?;
        Ok(lead_magnets.into_iter().map(|lm| lm.into()).collect())
    }

    pub async fn list_active_by_user(&self, user_id: &str) -> Result<Vec<LeadMagnetResponseDto>> {
        let lead_magnets = self.lead_magnets.list_active_by_user(user_id).await?;
        Ok(lead_magnets.into_iter().map(|lm| lm.into()).collect())
    }

    pub async fn create(
        &self,
        dto: CreateLeadMagnetDto,
        requester_id: &str,
    ) -> Result<LeadMagnetResponseDto> {
        dto.validate()?;

        validation::validate_form_action_url(dto.form_action_url.as_deref())?;
        validation::validate_download_file_url(dto.download_file_url.as_deref())?;

        let category = self.require_category(dto.category_id).await?;
        authorize(&category.user_id, requester_id, "Category")?;

        let lead_magnet = LeadMagnet {
            id: 0,
            category_id: dto.category_id,
            title: self.sanitizer.clean(&dto.title),
            form_action_url: dto.form_action_url,
            download_file_url: dto.download_file_url,
            is_active: dto.is_active,
            audit: Audit::created(requester_id),
        };

        let created = self.lead_magnets.insert(lead_magnet).await?;

        tracing::info!(
            "Lead magnet created: id={}, category={}",
            created.id,
            created.category_id
        );

        Ok(created.into())
    }

    pub async fn update(
        &self,
        dto: UpdateLeadMagnetDto,
        requester_id: &str,
    ) -> Result<LeadMagnetResponseDto> {
        if dto.id <= 0 {
            return Err(AppError::Validation(
                "Lead magnet ID is required for update.".to_string(),
            ));
        }

        dto.validate()?;

        validation::validate_form_action_url(dto.form_action_url.as_deref())?;
        validation::validate_download_file_url(dto.download_file_url.as_deref())?;

        let mut existing = self.lead_magnets.get_by_id(dto.id).await?.ok_or_else(|| {
            AppError::NotFound(format!("Lead magnet with ID {} not found.", dto.id))
        })?;

        let category = self.require_category(dto.category_id).await?;
        authorize(&category.user_id, requester_id, "Category")?;

        existing.title = self.sanitizer.clean(&dto.title);
        existing.form_action_url = dto.form_action_url;
        existing.download_file_url = dto.download_file_url;
        existing.category_id = dto.category_id;
        existing.is_active = dto.is_active;
        existing.audit.touch(requester_id);

        self.lead_magnets.update(&existing).await?;

        tracing::info!("Lead magnet updated: id={}", existing.id);

        Ok(existing.into())
    }

    pub async fn delete(&self, id: i32, requester_id: &str) -> Result<()> {
        if id <= 0 {
            return Err(AppError::Validation(
                "Lead magnet ID must be greater than zero.".to_string(),
            ));
        }

        let lead_magnet = self
            .lead_magnets
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Lead magnet with ID {} not found.", id)))?;

        self.authorize_through_category(&lead_magnet, requester_id)
            .await?;

        self.lead_magnets.delete(id).await?;

        tracing::info!("Lead magnet deleted: id={}", id);

        Ok(())
    }

    pub async fn soft_delete(&self, id: i32, requester_id: &str) -> Result<()> {
        let mut lead_magnet = self
            .lead_magnets
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Lead magnet with ID {} not found.", id)))?;

        self.authorize_through_category(&lead_magnet, requester_id)
            .await?;

        lead_magnet.is_active = false;
        lead_magnet.audit.touch(requester_id);

        self.lead_magnets.update(&lead_magnet).await?;

        tracing::info!("Lead magnet deactivated: id={}", id);

        Ok(())
    }

    async fn require_category(&self, category_id: i32) -> Result<Category> {
        self.categories
            .get_by_id(category_id)
            .await?
            .ok_or_else(|| AppError::Validation("Category not found.".to_string()))
    }

    /// Ownership lives on the category; a dangling category reference leaves
    /// nothing to check against.
    async fn authorize_through_category(
        &self,
        lead_magnet: &LeadMagnet,
        requester_id: &str,
    ) -> Result<()> {
        if let Some(category) = self.categories.get_by_id(lead_magnet.category_id).await? {
            authorize(&category.user_id, requester_id, "Lead magnet")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::repositories::InMemoryCategoryRepository;
    use crate::features::lead_magnets::repositories::InMemoryLeadMagnetRepository;
    use tokio_test::assert_ok;

    struct Fixture {
        service: LeadMagnetService,
        categories: Arc<InMemoryCategoryRepository>,
    }

    fn fixture() -> Fixture {
        let categories = Arc::new(InMemoryCategoryRepository::new());
        let lead_magnets = Arc::new(InMemoryLeadMagnetRepository::new(categories.clone()));
        let service = LeadMagnetService::new(
            lead_magnets,
            categories.clone(),
            Arc::new(Sanitizer::default()),
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

    fn create_dto(category_id: i32, title: &str) -> CreateLeadMagnetDto {
        CreateLeadMagnetDto {
            category_id,
            title: title.to_string(),
            form_action_url: None,
            download_file_url: None,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn create_requires_category_owned_by_requester() {
        let fixture = fixture();
        let category = seed_category(&fixture, "Finance", "user-2").await;

        let err = fixture
            .service
            .create(create_dto(category.id, "Free Template"), "user-1")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn create_succeeds_for_owner_and_stamps_audit() {
        let fixture = fixture();
        let category = seed_category(&fixture, "Finance", "user-1").await;

        let mut dto = create_dto(category.id, "Free Budgeting Template");
        dto.form_action_url = Some("https://mail.example.com/subscribe".to_string());
        dto.download_file_url = Some("https://cdn.example.com/template.xlsx".to_string());

        let created = fixture.service.create(dto, "user-1").await.unwrap();

        assert!(created.id > 0);
        assert_eq!(created.audit.created_by.as_deref(), Some("user-1"));
    }

    #[tokio::test]
    async fn create_rejects_missing_category() {
        let fixture = fixture();

        let err = fixture
            .service
            .create(create_dto(999, "Free Template"), "user-1")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn create_rejects_non_positive_category_id() {
        let fixture = fixture();

        let err = fixture
            .service
            .create(create_dto(0, "Free Template"), "user-1")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn create_rejects_relative_download_url() {
        let fixture = fixture();
        let category = seed_category(&fixture, "Finance", "user-1").await;

        let mut dto = create_dto(category.id, "Free Template");
        dto.download_file_url = Some("/files/template.xlsx".to_string());

        let err = fixture.service.create(dto, "user-1").await.unwrap_err();

        match err {
            AppError::Validation(msg) => assert!(msg.contains("Download file URL")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn create_sanitizes_title() {
        let fixture = fixture();
        let category = seed_category(&fixture, "Finance", "user-1").await;

        let created = fixture
            .service
            .create(
                create_dto(category.id, "<script>x</script>Free Template"),
                "user-1",
            )
            .await
            .unwrap();

        assert_eq!(created.title, "Free Template");
    }

    #[tokio::test]
    async fn update_moves_between_owned_categories() {
        let fixture = fixture();
        let first = seed_category(&fixture, "Finance", "user-1").await;
        let second = seed_category(&fixture, "Saving", "user-1").await;

        let created = fixture
            .service
            .create(create_dto(first.id, "Free Template"), "user-1")
            .await
            .unwrap();

        let updated = fixture
            .service
            .update(
                UpdateLeadMagnetDto {
                    id: created.id,
                    category_id: second.id,
                    title: "Free Template v2".to_string(),
                    form_action_url: None,
                    download_file_url: None,
                    is_active: true,
                },
                "user-1",
            )
            .await
            .unwrap();

        assert_eq!(updated.category_id, second.id);
        assert_eq!(updated.title, "Free Template v2");
        assert_eq!(updated.audit.modified_by.as_deref(), Some("user-1"));
    }

    #[tokio::test]
    async fn update_requires_existing_record() {
        let fixture = fixture();
        let category = seed_category(&fixture, "Finance", "user-1").await;

        let err = fixture
            .service
            .update(
                UpdateLeadMagnetDto {
                    id: 42,
                    category_id: category.id,
                    title: "Free Template".to_string(),
                    form_action_url: None,
                    download_file_url: None,
                    is_active: true,
                },
                "user-1",
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_checks_ownership_through_category() {
        let fixture = fixture();
        let category = seed_category(&fixture, "Finance", "user-1").await;
        let created = fixture
            .service
            .create(create_dto(category.id, "Free Template"), "user-1")
            .await
            .unwrap();

        let err = fixture
            .service
            .delete(created.id, "user-2")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        assert_ok!(fixture.service.delete(created.id, "user-1").await);
        assert!(fixture
            .service
            .get_by_id(created.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn soft_delete_deactivates_only() {
        let fixture = fixture();
        let category = seed_category(&fixture, "Finance", "user-1").await;
        let created = fixture
            .service
            .create(create_dto(category.id, "Free Template"), "user-1")
            .await
            .unwrap();

        assert_ok!(fixture.service.soft_delete(created.id, "user-1").await);

        let reloaded = fixture
            .service
            .get_by_id(created.id)
            .await
            .unwrap()
            .unwrap();
        assert!(!reloaded.is_active);

        let active = fixture
            .service
            .list_active_by_category(category.id)
            .await
            .unwrap();
        assert!(active.is_empty());

        let all = fixture.service.list_by_category(category.id).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn user_listings_join_through_categories() {
        let fixture = fixture();
        let mine = seed_category(&fixture, "Finance", "user-1").await;
        let theirs = seed_category(&fixture, "Cooking", "user-2").await;

        fixture
            .service
            .create(create_dto(mine.id, "Budget Template"), "user-1")
            .await
            .unwrap();
        fixture
            .service
            .create(create_dto(theirs.id, "Recipe Pack"), "user-2")
            .await
            .unwrap();

        let mine_all = fixture.service.list_by_user("user-1").await.unwrap();

        assert_eq!(mine_all.len(), 1);
        assert_eq!(mine_all[0].title, "Budget Template");
    }
}
