pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::lead_magnets::models::LeadMagnet;

pub use memory::InMemoryLeadMagnetRepository;
pub use postgres::PgLeadMagnetRepository;

/// Persistence collaborator for lead magnets.
///
/// Lead magnets have no owner column of their own; "by user" listings join
/// through the owning category.
#[async_trait]
pub trait LeadMagnetRepository: Send + Sync {
    async fn get_by_id(&self, id: i32) -> Result<Option<LeadMagnet>>;

    async fn list_by_category(&self, category_id: i32) -> Result<Vec<LeadMagnet>>;

    async fn list_active_by_category(&self, category_id: i32) -> Result<Vec<LeadMagnet>>;

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<LeadMagnet>>;

    async fn list_active_by_user(&self, user_id: &str) -> Result<Vec<LeadMagnet>>;

    /// Insert a new lead magnet (id is assigned by the store) and return it.
    async fn insert(&self, lead_magnet: LeadMagnet) -> Result<LeadMagnet>;

    async fn update(&self, lead_magnet: &LeadMagnet) -> Result<()>;

    async fn delete(&self, id: i32) -> Result<()>;
}
