//! Refresh Use Case
//!
//! Exchanges a live refresh token for a new access token.

use std::sync::Arc;

use crate::domain::repository::AccountRepository;
use crate::domain::value_object::account_id::AccountId;
use crate::error::{AuthError, AuthResult};
use crate::token::TokenService;

/// Refresh output
#[derive(Debug)]
pub struct RefreshOutput {
    pub account_id: AccountId,
    pub access_token: String,
}

/// Refresh use case
pub struct RefreshUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    tokens: Arc<TokenService>,
}

impl<R> RefreshUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, tokens: Arc<TokenService>) -> Self {
        Self { repo, tokens }
    }

    /// Verify the presented refresh token and issue a new access token.
    ///
    /// The presented token must equal the stored one byte-for-byte; this
    /// equality check is what makes the single-refresh-token policy
    /// enforceable, since every rotation invalidates all earlier copies.
    /// The refresh token itself is not rotated here.
    pub async fn execute(&self, refresh_token: &str) -> AuthResult<RefreshOutput> {
        let claims = self.tokens.verify_refresh_token(refresh_token)?;
        let account_id = AccountId::from_uuid(claims.sub);

        let credentials = self.repo.credentials(&account_id).await?;

        let stored = credentials.and_then(|c| c.refresh_token);
        if stored.as_deref() != Some(refresh_token) {
            tracing::warn!(account_id = %account_id, "Invalid refresh token presented");
            return Err(AuthError::InvalidRefreshToken);
        }

        let access_token = self.tokens.issue_access_token(&account_id)?;

        tracing::info!(account_id = %account_id, "Access token refreshed");

        Ok(RefreshOutput {
            account_id,
            access_token,
        })
    }
}
