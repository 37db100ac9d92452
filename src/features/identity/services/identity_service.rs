use std::sync::Arc;

use chrono::Utc;

use crate::core::error::Result;
use crate::features::identity::dtos::{LoginRequestDto, LoginResponseDto, UserInfoDto};
use crate::features::identity::provider::IdentityProvider;

/// Uniform failure message; never reveals whether the email exists.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Thin login/logout layer over the identity provider.
pub struct IdentityService {
    provider: Arc<dyn IdentityProvider>,
}

impl IdentityService {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self { provider }
    }

    pub async fn login(&self, request: LoginRequestDto) -> Result<LoginResponseDto> {
        if request.email.trim().is_empty() || request.password.is_empty() {
            return Ok(LoginResponseDto::failed(INVALID_CREDENTIALS));
        }

        let Some(user) = self.provider.find_user_by_email(&request.email).await? else {
            tracing::warn!("Login attempt for unknown email: {}", request.email);
            return Ok(LoginResponseDto::failed(INVALID_CREDENTIALS));
        };

        if !user.is_active {
            tracing::warn!("Login attempt for inactive account: {}", request.email);
            return Ok(LoginResponseDto::failed(INVALID_CREDENTIALS));
        }

        // Lockout state is not secret, so it gets its own message
        if self.provider.is_locked_out(&user).await? {
            let message = match self.provider.lockout_end(&user).await? {
                Some(end) if end > Utc::now() => format!(
                    "Your account is locked until {}. Please try again later.",
                    end.format("%Y-%m-%d %H:%M UTC")
                ),
                _ => "Your account is locked. Please try again later.".to_string(),
            };
            return Ok(LoginResponseDto::failed(message));
        }

        if !self.provider.check_password(&user, &request.password).await? {
            tracing::warn!("Invalid password attempt for email: {}", request.email);
            return Ok(LoginResponseDto::failed(INVALID_CREDENTIALS));
        }

        self.provider.sign_in(&user, request.remember_me).await?;
        self.provider.reset_failed_count(&user).await?;
        self.provider.update_last_login(&user.id, Utc::now()).await?;

        tracing::info!("User logged in: id={}", user.id);

        Ok(LoginResponseDto::succeeded(user.into()))
    }

    pub async fn logout(&self) -> Result<()> {
        self.provider.sign_out().await
    }

    /// The authenticated, active user for the current session.
    pub async fn current_user(&self) -> Result<Option<UserInfoDto>> {
        let user = self.provider.current_user().await?;
        Ok(user.filter(|u| u.is_active).map(|u| u.into()))
    }
}
