//! Google Login Use Case
//!
//! Resolves a verified Google profile to exactly one account: an
//! existing Google-linked account, an existing email account that gets
//! the Google identity attached, or a brand-new account. The OAuth
//! handshake itself is an external collaborator; this use case only ever
//! sees an already-verified profile. Token issuance and the cookie are
//! the boundary's job, exactly as for a credential login.

use std::sync::Arc;

use kernel::error::app_error::AppError;

use crate::domain::entity::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{email::Email, google_id::GoogleId};
use crate::error::{AuthError, AuthResult};

/// Verified profile handed over by the OAuth boundary
#[derive(Debug, Clone)]
pub struct GoogleProfile {
    pub google_id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

/// Google login use case
pub struct GoogleLoginUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
}

impl<R> GoogleLoginUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, profile: GoogleProfile) -> AuthResult<Account> {
        let google_id = GoogleId::new(&profile.google_id)?;

        // Already linked: return as-is, no re-link, no token rotation here
        if let Some(account) = self.repo.find_by_google_id(&google_id).await? {
            return Ok(account);
        }

        // Known email: attach the Google identity to the existing account
        if let Some(raw_email) = &profile.email {
            let email = Email::new(raw_email)?;
            if let Some(mut account) = self.repo.find_by_email(&email).await? {
                self.repo
                    .attach_google_id(&account.account_id, &google_id)
                    .await?;
                account.link_google(google_id);

                tracing::info!(
                    account_id = %account.account_id,
                    email = %account.email,
                    "Linked Google identity to existing account"
                );
                return Ok(account);
            }
        }

        // New account: every account needs an email identity
        let email = match &profile.email {
            Some(raw_email) => Email::new(raw_email)?,
            None => {
                return Err(AuthError::Validation(AppError::validation(
                    "email",
                    "An email address is required to create an account",
                )));
            }
        };

        let account = Account::new_google(google_id, email, profile.display_name);
        self.repo.create(&account, None).await?;

        tracing::info!(
            account_id = %account.account_id,
            email = %account.email,
            "Created account from Google profile"
        );

        Ok(account)
    }
}
