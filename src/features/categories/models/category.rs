use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::shared::audit::Audit;

/// Database model for a user-owned category node.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub user_id: String,
    pub parent_category_id: Option<i32>,
    pub is_active: bool,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: Audit,
}
