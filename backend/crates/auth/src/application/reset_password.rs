//! Reset Password Use Case
//!
//! Consumes a reset token and replaces the account's password.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::Account;
use crate::domain::gateway::{MailGateway, MailMessage};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{
    email::Email,
    password::{PasswordHash, RawPassword},
};
use crate::error::{AuthError, AuthResult};
use crate::token::TokenService;

/// Reset password input
pub struct ResetPasswordInput {
    /// Reset token from the emailed link
    pub token: String,
    /// New password
    pub password: String,
}

/// Reset password use case
pub struct ResetPasswordUseCase<R, M>
where
    R: AccountRepository,
    M: MailGateway,
{
    repo: Arc<R>,
    mailer: Arc<M>,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
}

impl<R, M> ResetPasswordUseCase<R, M>
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

    pub async fn execute(&self, input: ResetPasswordInput) -> AuthResult<()> {
        let claims = self.tokens.verify_reset_token(&input.token)?;

        if claims.email.is_empty() {
            tracing::error!("Reset token payload carries no email");
            return Err(AuthError::ResetPayloadInvalid);
        }
        let email = Email::new(&claims.email).map_err(|_| AuthError::ResetPayloadInvalid)?;

        let account = match self.repo.find_by_email(&email).await? {
            Some(account) => account,
            None => {
                tracing::error!(email = %email, "Reset requested for missing account");
                return Err(AuthError::AccountNotFound);
            }
        };

        // A consumed (or never issued) reset token cannot be replayed:
        // a successful reset clears the stored token.
        let credentials = self
            .repo
            .credentials(&account.account_id)
            .await?
            .ok_or(AuthError::AccountNotFound)?;
        if credentials.password_reset_token.is_none() {
            tracing::error!(email = %email, "No outstanding password reset token");
            return Err(AuthError::ResetTokenNotSet);
        }

        let raw_password = RawPassword::new(input.password)?;
        let password_hash = PasswordHash::from_raw(&raw_password, self.config.pepper())?;

        self.repo
            .update_password(&account.account_id, &password_hash)
            .await?;

        tracing::info!(email = %email, "Password reset successful");

        // Confirmation mail is best-effort; the password change stands
        // regardless.
        let mail = reset_confirmation_mail(&account);
        if let Err(e) = self.mailer.send(mail).await {
            tracing::warn!(email = %email, error = %e, "Failed to send reset confirmation email");
        }

        Ok(())
    }
}

/// Confirmation message sent after a successful reset
fn reset_confirmation_mail(account: &Account) -> MailMessage {
    let handle = account.display_handle();

    let text_body = format!(
        "Hi {},\n\nYour password has been successfully reset. If you did not \
         perform this action, please contact our support team immediately.\n",
        handle
    );

    let html_body = format!(
        concat!(
            "<p>Hi {},</p>",
            "<p>Your password has been <strong>successfully reset</strong>.</p>",
            "<p>If you did <strong>not</strong> perform this action, please secure your ",
            "account immediately by contacting our support team.</p>",
            "<p style=\"margin-top:20px;font-size:12px;color:#888;\">",
            "For your security, never share your password with anyone.</p>",
        ),
        handle
    );

    MailMessage {
        to: account.email.clone(),
        subject: "Password Reset Successful".to_string(),
        text_body,
        html_body,
    }
}
