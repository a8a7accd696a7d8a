//! Sign Up Use Case
//!
//! Creates a new account and opens its first session.

use std::sync::Arc;

use kernel::error::app_error::AppError;

use crate::application::config::AuthConfig;
use crate::domain::entity::{Account, Profile};
use crate::domain::repository::{AccountRepository, DuplicateIdentity};
use crate::domain::value_object::{
    email::Email, google_id::GoogleId, password::{PasswordHash, RawPassword}, role::Role,
    user_name::UserName,
};
use crate::error::{AuthError, AuthResult};
use crate::token::TokenService;

/// Sign up input
pub struct SignUpInput {
    pub email: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub google_id: Option<String>,
    pub role: Option<String>,
    pub display_name: Option<String>,
    pub business_name: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

/// Sign up output
#[derive(Debug)]
pub struct SignUpOutput {
    pub account: Account,
    pub access_token: String,
    pub refresh_token: String,
}

/// Sign up use case
pub struct SignUpUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
}

impl<R> SignUpUseCase<R>
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

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        let email = Email::new(&input.email)?;
        let username = input.username.map(UserName::new).transpose()?;
        let google_id = input.google_id.map(GoogleId::new).transpose()?;

        let role = match input.role.as_deref() {
            None => Role::User,
            Some(code) => Role::parse(code)?,
        };

        // Elevated self-registration is allow-list gated
        if role.is_admin() && !self.config.is_admin_email(email.as_str()) {
            tracing::warn!(email = %email, "Blocked admin registration outside allow-list");
            return Err(AuthError::AdminNotAllowed);
        }

        // An account always has a way to sign in
        if input.password.is_none() && google_id.is_none() {
            return Err(AuthError::Validation(
                AppError::bad_request("Either password or googleId is required for signup")
                    .with_field_error(
                        Some("password".to_string()),
                        "Either password or googleId is required for signup",
                    )
                    .with_field_error(
                        Some("googleId".to_string()),
                        "Either password or googleId is required for signup",
                    ),
            ));
        }

        let profile = Profile::new(
            input.display_name,
            input.business_name,
            input.address,
            input.phone_number,
        )?;

        // Pre-check both unique fields so the conflict names the right one
        match self.repo.duplicate_identity(&email, username.as_ref()).await? {
            Some(DuplicateIdentity::Email) => {
                tracing::warn!(email = %email, "Attempt to register with existing email");
                return Err(AuthError::EmailTaken);
            }
            Some(DuplicateIdentity::Username) => {
                tracing::warn!(email = %email, "Attempt to register with existing username");
                return Err(AuthError::UsernameTaken);
            }
            None => {}
        }

        let password_hash = input
            .password
            .map(|raw| {
                let raw = RawPassword::new(raw)?;
                PasswordHash::from_raw(&raw, self.config.pepper())
            })
            .transpose()?;

        let account = Account::new(email, username, google_id, role, profile);

        self.repo.create(&account, password_hash.as_ref()).await?;

        let access_token = self.tokens.issue_access_token(&account.account_id)?;
        let refresh_token = self.tokens.issue_refresh_token(&account.account_id)?;

        self.repo
            .store_refresh_token(&account.account_id, &refresh_token)
            .await?;

        tracing::info!(
            account_id = %account.account_id,
            email = %account.email,
            role = %account.role,
            "New user registered"
        );

        Ok(SignUpOutput {
            account,
            access_token,
            refresh_token,
        })
    }
}
