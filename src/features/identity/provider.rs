use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::core::error::Result;
use crate::features::identity::models::{NewUser, User};

/// External authentication collaborator.
///
/// Credential storage, password hashing, session cookies, and lockout
/// accounting all live behind this boundary; the service only sequences the
/// calls and shapes the messages.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn check_password(&self, user: &User, password: &str) -> Result<bool>;

    async fn is_locked_out(&self, user: &User) -> Result<bool>;

    /// End of the lockout window, when one is in effect.
    async fn lockout_end(&self, user: &User) -> Result<Option<DateTime<Utc>>>;

    /// Establish a session for the user.
    async fn sign_in(&self, user: &User, remember_me: bool) -> Result<()>;

    /// Terminate the current session.
    async fn sign_out(&self) -> Result<()>;

    async fn reset_failed_count(&self, user: &User) -> Result<()>;

    async fn update_last_login(&self, user_id: &str, at: DateTime<Utc>) -> Result<()>;

    async fn create_user(&self, new_user: NewUser) -> Result<User>;

    /// The user bound to the current session, if any.
    async fn current_user(&self) -> Result<Option<User>>;
}
