use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Audit trail carried by every owned record.
///
/// Stamping goes through the two helpers below so create/update paths cannot
/// drift apart.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Audit {
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub modified_by: Option<String>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl Audit {
    /// Fresh stamp for a record being created now.
    pub fn created(by: &str) -> Self {
        Self {
            created_by: Some(by.to_string()),
            created_at: Utc::now(),
            modified_by: None,
            modified_at: None,
        }
    }

    /// Record a mutation by the given user.
    pub fn touch(&mut self, by: &str) {
        self.modified_by = Some(by.to_string());
        self.modified_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_stamp_has_no_modification() {
        let audit = Audit::created("user-1");
        assert_eq!(audit.created_by.as_deref(), Some("user-1"));
        assert!(audit.modified_by.is_none());
        assert!(audit.modified_at.is_none());
    }

    #[test]
    fn touch_records_the_modifier() {
        let mut audit = Audit::created("user-1");
        audit.touch("user-2");
        assert_eq!(audit.created_by.as_deref(), Some("user-1"));
        assert_eq!(audit.modified_by.as_deref(), Some("user-2"));
        assert!(audit.modified_at.is_some());
    }
}
