//! Logout Use Case
//!
//! Clears the account's stored refresh token.

use std::sync::Arc;

use crate::domain::repository::AccountRepository;
use crate::domain::value_object::account_id::AccountId;
use crate::error::{AuthError, AuthResult};

/// Logout use case
pub struct LogoutUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
}

impl<R> LogoutUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Clear the caller's refresh token
    ///
    /// Idempotent: logging out an already logged-out account succeeds.
    /// A store failure surfaces as an internal error.
    pub async fn execute(&self, account_id: Option<AccountId>) -> AuthResult<()> {
        let account_id = account_id.ok_or_else(|| {
            tracing::error!("A user identity is required for logout");
            AuthError::CallerRequired
        })?;

        self.repo.clear_refresh_token(&account_id).await?;

        tracing::info!(account_id = %account_id, "User logged out");
        Ok(())
    }
}
