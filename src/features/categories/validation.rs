//! Category field checks shared by the create/update DTOs and the service.
//!
//! Each field has an `is_valid_*` predicate and a throwing counterpart; the
//! `check_*` functions plug into `validator` derives on the DTOs.

use validator::ValidationError;

use crate::core::error::{AppError, Result};
use crate::shared::constants::{
    CATEGORY_COLOR_MAX_LEN, CATEGORY_DESCRIPTION_MAX_LEN, CATEGORY_NAME_MAX_LEN, USER_ID_MAX_LEN,
};
use crate::shared::validation::{validation_error, CSS_COLOR_NAME_REGEX, HEX_COLOR_REGEX};

pub fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty() && name.chars().count() <= CATEGORY_NAME_MAX_LEN
}

pub fn check_name(name: &str) -> std::result::Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(validation_error("required", "Category name is required."));
    }
    if name.chars().count() > CATEGORY_NAME_MAX_LEN {
        return Err(validation_error(
            "length",
            format!(
                "Category name cannot exceed {} characters.",
                CATEGORY_NAME_MAX_LEN
            ),
        ));
    }
    Ok(())
}

pub fn is_valid_description(description: &str) -> bool {
    description.chars().count() <= CATEGORY_DESCRIPTION_MAX_LEN
}

pub fn check_description(description: &str) -> std::result::Result<(), ValidationError> {
    if !is_valid_description(description) {
        return Err(validation_error(
            "length",
            format!(
                "Category description cannot exceed {} characters.",
                CATEGORY_DESCRIPTION_MAX_LEN
            ),
        ));
    }
    Ok(())
}

/// Accepts `#RGB`/`#RRGGBB` hex codes or a bare alphabetic token (simplified
/// CSS color name check).
pub fn is_valid_color_format(color: &str) -> bool {
    color.trim().is_empty()
        || HEX_COLOR_REGEX.is_match(color)
        || CSS_COLOR_NAME_REGEX.is_match(color)
}

pub fn check_color(color: &str) -> std::result::Result<(), ValidationError> {
    if color.chars().count() > CATEGORY_COLOR_MAX_LEN {
        return Err(validation_error(
            "length",
            format!(
                "Category color cannot exceed {} characters.",
                CATEGORY_COLOR_MAX_LEN
            ),
        ));
    }
    if !is_valid_color_format(color) {
        return Err(validation_error(
            "format",
            "Category color must be a valid hex color (#FF0000, #fff) or CSS color name.",
        ));
    }
    Ok(())
}

pub fn is_valid_user_id(user_id: &str) -> bool {
    !user_id.trim().is_empty() && user_id.chars().count() <= USER_ID_MAX_LEN
}

pub fn check_user_id(user_id: &str) -> std::result::Result<(), ValidationError> {
    if user_id.trim().is_empty() {
        return Err(validation_error("required", "UserId is required."));
    }
    if user_id.chars().count() > USER_ID_MAX_LEN {
        return Err(validation_error(
            "length",
            format!("UserId cannot exceed {} characters.", USER_ID_MAX_LEN),
        ));
    }
    Ok(())
}

pub fn is_valid_parent_reference(category_id: i32, parent_category_id: Option<i32>) -> bool {
    match parent_category_id {
        Some(parent_id) => parent_id != category_id,
        None => true,
    }
}

/// Reject a category naming itself as parent.
pub fn validate_parent_reference(category_id: i32, parent_category_id: Option<i32>) -> Result<()> {
    if !is_valid_parent_reference(category_id, parent_category_id) {
        return Err(AppError::Validation(
            "A category cannot be its own parent.".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_must_be_present_and_bounded() {
        assert!(is_valid_name("Finance"));
        assert!(!is_valid_name("   "));
        assert!(!is_valid_name(&"x".repeat(101)));
        assert!(check_name("Finance").is_ok());
        assert!(check_name("").is_err());
    }

    #[test]
    fn description_is_optional_but_bounded() {
        assert!(is_valid_description(""));
        assert!(is_valid_description("Monthly budgets"));
        assert!(!is_valid_description(&"x".repeat(501)));
    }

    #[test]
    fn color_accepts_hex_and_css_names() {
        assert!(is_valid_color_format("#FF0000"));
        assert!(is_valid_color_format("#fff"));
        assert!(is_valid_color_format("teal"));
        assert!(is_valid_color_format(""));
        assert!(!is_valid_color_format("#12"));
        assert!(!is_valid_color_format("url(evil)"));
        assert!(check_color(&"a".repeat(51)).is_err());
    }

    #[test]
    fn parent_reference_rejects_self() {
        assert!(is_valid_parent_reference(1, None));
        assert!(is_valid_parent_reference(1, Some(2)));
        assert!(!is_valid_parent_reference(1, Some(1)));
        assert!(validate_parent_reference(1, Some(1)).is_err());
    }
}
