use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::features::categories::models::Category;
use crate::shared::audit::Audit;

fn default_is_active() -> bool {
    true
}

/// Create request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategoryDto {
    #[validate(custom(function = crate::features::categories::validation::check_name))]
    pub name: String,

    #[validate(custom(function = crate::features::categories::validation::check_description))]
    pub description: Option<String>,

    #[validate(custom(function = crate::features::categories::validation::check_color))]
    pub color: Option<String>,

    /// Owner of the category; must match the authenticated requester.
    #[validate(custom(function = crate::features::categories::validation::check_user_id))]
    pub user_id: String,

    pub parent_category_id: Option<i32>,

    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

/// Update request (full replace of mutable fields)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCategoryDto {
    pub id: i32,

    #[validate(custom(function = crate::features::categories::validation::check_name))]
    pub name: String,

    #[validate(custom(function = crate::features::categories::validation::check_description))]
    pub description: Option<String>,

    #[validate(custom(function = crate::features::categories::validation::check_color))]
    pub color: Option<String>,

    #[validate(custom(function = crate::features::categories::validation::check_user_id))]
    pub user_id: String,

    pub parent_category_id: Option<i32>,

    pub is_active: bool,
}

/// Response DTO for a category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponseDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub user_id: String,
    pub parent_category_id: Option<i32>,
    pub is_active: bool,
    #[serde(flatten)]
    pub audit: Audit,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
            color: c.color,
            user_id: c.user_id,
            parent_category_id: c.parent_category_id,
            is_active: c.is_active,
            audit: c.audit,
        }
    }
}
