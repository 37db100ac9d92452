use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::audit::Audit;

/// Account record as reported by the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub roles: Vec<String>,
    pub is_active: bool,
    pub last_login_date: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub audit: Audit,
}

/// Payload for provisioning an account through the provider.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub roles: Vec<String>,
}
