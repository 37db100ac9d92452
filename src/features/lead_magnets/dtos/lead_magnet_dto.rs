use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::features::lead_magnets::models::LeadMagnet;
use crate::shared::audit::Audit;

fn default_is_active() -> bool {
    true
}

/// Create request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLeadMagnetDto {
    #[validate(range(min = 1, message = "Category ID must be greater than zero."))]
    pub category_id: i32,

    #[validate(custom(function = crate::features::lead_magnets::validation::check_title))]
    pub title: String,

    pub form_action_url: Option<String>,

    pub download_file_url: Option<String>,

    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

/// Update request (full replace of mutable fields)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateLeadMagnetDto {
    pub id: i32,

    #[validate(range(min = 1, message = "Category ID must be greater than zero."))]
    pub category_id: i32,

    #[validate(custom(function = crate::features::lead_magnets::validation::check_title))]
    pub title: String,

    pub form_action_url: Option<String>,

    pub download_file_url: Option<String>,

    pub is_active: bool,
}

/// Response DTO for a lead magnet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadMagnetResponseDto {
    pub id: i32,
    pub category_id: i32,
    pub title: String,
    pub form_action_url: Option<String>,
    pub download_file_url: Option<String>,
    pub is_active: bool,
    #[serde(flatten)]
    pub audit: Audit,
}

impl From<LeadMagnet> for LeadMagnetResponseDto {
    fn from(lm: LeadMagnet) -> Self {
        Self {
            id: lm.id,
            category_id: lm.category_id,
            title: lm.title,
            form_action_url: lm.form_action_url,
            download_file_url: lm.download_file_url,
            is_active: lm.is_active,
            audit: lm.audit,
        }
    }
}
