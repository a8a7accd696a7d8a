//! Login Use Case
//!
//! Authenticates credentials and rotates the account's session pair.
//!
//! Two concurrent logins for the same account are last-write-wins on the
//! stored refresh token: the most recent login owns the session and the
//! earlier device's refresh token stops working. The update is not
//! serialized across requests.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::password::RawPassword;
use crate::error::{AuthError, AuthResult};
use crate::token::TokenService;

/// Login input
pub struct LoginInput {
    /// Email or username
    pub identifier: String,
    /// Password
    pub password: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    pub account: Account,
    pub access_token: String,
    pub refresh_token: String,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
}

impl<R> LoginUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, tokens: Arc<TokenService>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let identifier = input.identifier.trim();

        let account = match self.repo.find_by_identifier(identifier).await? {
            Some(account) => account,
            None => {
                tracing::warn!(identifier = %identifier, "Failed login for unknown identifier");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let credentials = self
            .repo
            .credentials(&account.account_id)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        // Google-only accounts have no password; same generic failure
        let password_hash = credentials
            .password_hash
            .ok_or(AuthError::InvalidCredentials)?;

        let raw_password =
            RawPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        if !password_hash.verify(&raw_password, self.config.pepper()) {
            tracing::warn!(identifier = %identifier, "Failed login due to incorrect password");
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = self.tokens.issue_access_token(&account.account_id)?;
        let refresh_token = self.tokens.issue_refresh_token(&account.account_id)?;

        // Overwrite, never append: earlier refresh tokens die here
        self.repo
            .store_refresh_token(&account.account_id, &refresh_token)
            .await?;

        tracing::info!(
            account_id = %account.account_id,
            email = %account.email,
            "User logged in"
        );

        Ok(LoginOutput {
            account,
            access_token,
            refresh_token,
        })
    }
}
