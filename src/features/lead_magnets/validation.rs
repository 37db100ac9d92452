//! Title, URL, and category-reference checks for lead magnets.

use validator::ValidationError;

use crate::core::error::{AppError, Result};
use crate::shared::constants::{TITLE_MAX_LEN, URL_MAX_LEN};
use crate::shared::validation::{is_absolute_http_url, validation_error};

pub fn is_valid_title(title: &str) -> bool {
    !title.trim().is_empty() && title.chars().count() <= TITLE_MAX_LEN
}

pub fn check_title(title: &str) -> std::result::Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(validation_error("required", "Lead magnet title is required."));
    }
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(validation_error(
            "length",
            format!("Lead magnet title cannot exceed {} characters.", TITLE_MAX_LEN),
        ));
    }
    Ok(())
}

/// Both URL fields are optional, but a present value must be an absolute
/// http/https URL within the length bound.
fn is_valid_optional_url(url: Option<&str>) -> bool {
    match url {
        None => true,
        Some(url) if url.trim().is_empty() => true,
        Some(url) => url.chars().count() <= URL_MAX_LEN && is_absolute_http_url(url),
    }
}

pub fn is_valid_form_action_url(form_action_url: Option<&str>) -> bool {
    is_valid_optional_url(form_action_url)
}

pub fn validate_form_action_url(form_action_url: Option<&str>) -> Result<()> {
    let Some(url) = form_action_url.filter(|u| !u.trim().is_empty()) else {
        return Ok(());
    };

    if url.chars().count() > URL_MAX_LEN {
        return Err(AppError::Validation(format!(
            "Form action URL cannot exceed {} characters.",
            URL_MAX_LEN
        )));
    }
    if !is_absolute_http_url(url) {
        return Err(AppError::Validation(
            "Form action URL must be a valid absolute URL (http:// or https://).".to_string(),
        ));
    }
    Ok(())
}

pub fn is_valid_download_file_url(download_file_url: Option<&str>) -> bool {
    is_valid_optional_url(download_file_url)
}

pub fn validate_download_file_url(download_file_url: Option<&str>) -> Result<()> {
    let Some(url) = download_file_url.filter(|u| !u.trim().is_empty()) else {
        return Ok(());
    };

    if url.chars().count() > URL_MAX_LEN {
        return Err(AppError::Validation(format!(
            "Download file URL cannot exceed {} characters.",
            URL_MAX_LEN
        )));
    }
    if !is_absolute_http_url(url) {
        return Err(AppError::Validation(
            "Download file URL must be a valid absolute URL (http:// or https://).".to_string(),
        ));
    }
    Ok(())
}

pub fn is_valid_category_id(category_id: i32) -> bool {
    category_id > 0
}

pub fn validate_category_id(category_id: i32) -> Result<()> {
    if !is_valid_category_id(category_id) {
        return Err(AppError::Validation(
            "Category ID must be greater than zero.".to_string(),
        ));
    }
    Ok(())
}
