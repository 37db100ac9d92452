use crate::core::error::{AppError, Result};

/// Ownership gate invoked before every mutation.
///
/// One code path for all services; the resource label only shapes the error
/// message.
pub fn authorize(resource_owner_id: &str, requester_id: &str, resource: &str) -> Result<()> {
    if resource_owner_id != requester_id {
        return Err(AppError::Forbidden(format!(
            "{} does not belong to the authenticated user.",
            resource
        )));
    }
    Ok(())
}
