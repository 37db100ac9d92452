use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::core::error::{AppError, Result};
use crate::features::categories::repositories::CategoryRepository;
use crate::features::lead_magnets::models::LeadMagnet;
use crate::features::lead_magnets::repositories::LeadMagnetRepository;

/// In-memory lead magnet store for tests and local development.
///
/// "By user" listings resolve ownership through the category repository,
/// mirroring the join the Postgres implementation performs.
pub struct InMemoryLeadMagnetRepository {
    lead_magnets: RwLock<HashMap<i32, LeadMagnet>>,
    categories: Arc<dyn CategoryRepository>,
    next_id: AtomicI32,
}

impl InMemoryLeadMagnetRepository {
    pub fn new(categories: Arc<dyn CategoryRepository>) -> Self {
        Self {
            lead_magnets: RwLock::new(HashMap::new()),
            categories,
            next_id: AtomicI32::new(1),
        }
    }

    fn by_title(mut lead_magnets: Vec<LeadMagnet>) -> Vec<LeadMagnet> {
        lead_magnets.sort_by(|a, b| a.title.cmp(&b.title));
        lead_magnets
    }

    async fn owned_category_ids(&self, user_id: &str) -> Result<Vec<i32>> {
        Ok(self
            .categories
            .list_by_user(user_id)
            .await?
            .into_iter()
            .map(|c| c.id)
            .collect())
    }
}

#[async_trait]
impl LeadMagnetRepository for InMemoryLeadMagnetRepository {
    async fn get_by_id(&self, id: i32) -> Result<Option<LeadMagnet>> {
        Ok(self.lead_magnets.read().await.get(&id).cloned())
    }

    async fn list_by_category(&self, category_id: i32) -> Result<Vec<LeadMagnet>> {
        let lead_magnets = self.lead_magnets.read().await;
        Ok(Self::by_title(
            lead_magnets
                .values()
                .filter(|lm| lm.category_id == category_id)
                .cloned()
                .collect(),
        ))
    }

    async fn list_active_by_category(&self, category_id: i32) -> Result<Vec<LeadMagnet>> {
        let lead_magnets = self.lead_magnets.read().await;
        Ok(Self::by_title(
            lead_magnets
                .values()
                .filter(|lm| lm.category_id == category_id && lm.is_active)
                .cloned()
                .collect(),
        ))
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<LeadMagnet>> {
        let owned = self.owned_category_ids(user_id).await?;
        let lead_magnets = self.lead_magnets.read().await;
        Ok(Self::by_title(
            lead_magnets
                .values()
                .filter(|lm| owned.contains(&lm.category_id))
                .cloned()
                .collect(),
        ))
    }

    async fn list_active_by_user(&self, user_id: &str) -> Result<Vec<LeadMagnet>> {
        let owned = self.owned_category_ids(user_id).await?;
        let lead_magnets = self.lead_magnets.read().await;
        Ok(Self::by_title(
            lead_magnets
                .values()
                .filter(|lm| lm.is_active && owned.contains(&lm.category_id))
                .cloned()
                .collect(),
        ))
    }

    async fn insert(&self, mut lead_magnet: LeadMagnet) -> Result<LeadMagnet> {
        lead_magnet.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.lead_magnets
            .write()
            .await
            .insert(lead_magnet.id, lead_magnet.clone());
        Ok(lead_magnet)
    }

    async fn update(&self, lead_magnet: &LeadMagnet) -> Result<()> {
        let mut lead_magnets = self.lead_magnets.write().await;
        match lead_magnets.get_mut(&lead_magnet.id) {
            Some(existing) => {
                *existing = lead_magnet.clone();
                Ok(())
            }
            None => Err(AppError::NotFound(format!(
                "Lead magnet with ID {} not found.",
                lead_magnet.id
            ))),
        }
    }

    async fn delete(&self, id: i32) -> Result<()> {
        match self.lead_magnets.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(format!(
                "Lead magnet with ID {} not found.",
                id
            ))),
        }
    }
}
