use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::shared::audit::Audit;

/// Database model for a lead magnet: form-action endpoint plus the asset
/// handed out after signup.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct LeadMagnet {
    pub id: i32,
    pub category_id: i32,
    pub title: String,
    pub form_action_url: Option<String>,
    pub download_file_url: Option<String>,
    pub is_active: bool,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: Audit,
}
