//! Forgot Password Use Case
//!
//! Issues a short-lived reset token, mails the reset link, then persists
//! the token on the account.
//!
//! Unlike login, this flow reveals whether the email is registered (404
//! for unknown emails) — an accepted product trade-off inherited from
//! the original API, at odds with the anti-enumeration stance taken by
//! login.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::Account;
use crate::domain::gateway::{MailGateway, MailMessage};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};
use crate::token::TokenService;

/// Forgot password input
pub struct ForgotPasswordInput {
    pub email: String,
}

/// Forgot password output: the confirmed recipient address
#[derive(Debug)]
pub struct ForgotPasswordOutput {
    pub email: Email,
}

/// Forgot password use case
pub struct ForgotPasswordUseCase<R, M>
where
    R: AccountRepository,
    M: MailGateway,
{
    repo: Arc<R>,
    mailer: Arc<M>,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
}

impl<R, M> ForgotPasswordUseCase<R, M>
where
    R: AccountRepository,
    M: MailGateway,
{
    pub fn new(
        repo: Arc<R>,
        mailer: Arc<M>,
        tokens: Arc<TokenService>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            repo,
            mailer,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, input: ForgotPasswordInput) -> AuthResult<ForgotPasswordOutput> {
        let email = Email::new(&input.email)?;

        let account = match self.repo.find_by_email(&email).await? {
            Some(account) => account,
            None => {
                tracing::warn!(email = %email, "Password reset requested for unknown email");
                return Err(AuthError::EmailNotRegistered);
            }
        };

        let reset_token = self.tokens.issue_reset_token(&email)?;

        let mail = reset_request_mail(&self.config, &account, &reset_token);
        let receipt = self.mailer.send(mail).await?;
        if !receipt.is_confirmed() {
            tracing::error!(email = %email, "Failed to send password reset email");
            return Err(AuthError::MailDelivery(
                "mail gateway returned no delivery id".to_string(),
            ));
        }

        // The account could have been removed between the read and this
        // write; zero rows matched means there is no account to reset.
        let stored = self
            .repo
            .store_reset_token(&account.account_id, &reset_token)
            .await?;
        if !stored {
            tracing::error!(email = %email, "Account vanished before reset token was stored");
            return Err(AuthError::EmailNotRegistered);
        }

        tracing::info!(email = %email, "Password reset email sent");

        Ok(ForgotPasswordOutput { email })
    }
}

/// Reset-request message with the tokenized link
fn reset_request_mail(config: &AuthConfig, account: &Account, reset_token: &str) -> MailMessage {
    let handle = account.display_handle();
    let reset_link = format!("{}/reset-password?token={}", config.client_url, reset_token);

    let text_body = format!(
        "Hi {},\n\nYou requested a password reset. Use the link below:\n{}\n\n\
         This link will expire in 15 minutes. If you did not request this, \
         please ignore this email.\n",
        handle, reset_link
    );

    let html_body = format!(
        concat!(
            "<p>Hi {},</p>",
            "<p>You requested a password reset. Click the button below to reset your password:</p>",
            "<p style=\"text-align:center;\">",
            "<a href=\"{}\" style=\"display:inline-block;padding:10px 20px;",
            "background-color:#4CAF50;color:#fff;text-decoration:none;",
            "border-radius:5px;font-weight:bold;\">Reset Password</a></p>",
            "<p>This link will expire in <strong>15 minutes</strong>.</p>",
            "<p>If you did not request this, please ignore this email.</p>",
            "<p style=\"font-size:12px;color:#888;\">Never share your password or reset link with anyone.</p>",
        ),
        handle, reset_link
    );

    MailMessage {
        to: account.email.clone(),
        subject: "Password Reset Request".to_string(),
        text_body,
        html_body,
    }
}
