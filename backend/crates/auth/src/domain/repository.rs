//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in the
//! infrastructure layer.

use crate::domain::entity::{Account, StoredCredentials};
use crate::domain::value_object::{
    account_id::AccountId, email::Email, google_id::GoogleId, password::PasswordHash,
    user_name::UserName,
};
use crate::error::AuthResult;

/// Which unique identity field a sign-up collided on
///
/// Email is reported first when both collide, so the conflict error can
/// name the offending field precisely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateIdentity {
    Email,
    Username,
}

/// Account repository trait
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Create a new account, optionally with a password hash
    async fn create(
        &self,
        account: &Account,
        password_hash: Option<&PasswordHash>,
    ) -> AuthResult<()>;

    /// Find account by ID
    async fn find_by_id(&self, account_id: &AccountId) -> AuthResult<Option<Account>>;

    /// Find account by a login identifier (matched against email, then
    /// username; both are unique so at most one row matches)
    async fn find_by_identifier(&self, identifier: &str) -> AuthResult<Option<Account>>;

    /// Find account by email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Account>>;

    /// Find account by Google subject id
    async fn find_by_google_id(&self, google_id: &GoogleId) -> AuthResult<Option<Account>>;

    /// Sign-up pre-check: report which unique field is already taken
    async fn duplicate_identity(
        &self,
        email: &Email,
        username: Option<&UserName>,
    ) -> AuthResult<Option<DuplicateIdentity>>;

    /// Explicit read of the sensitive companion record
    async fn credentials(&self, account_id: &AccountId) -> AuthResult<Option<StoredCredentials>>;

    /// Overwrite the stored refresh token (one live token per account)
    async fn store_refresh_token(
        &self,
        account_id: &AccountId,
        refresh_token: &str,
    ) -> AuthResult<()>;

    /// Clear the stored refresh token. Idempotent: clearing an absent
    /// token is still a success.
    async fn clear_refresh_token(&self, account_id: &AccountId) -> AuthResult<()>;

    /// Persist a password-reset token; returns false when no row matched
    async fn store_reset_token(
        &self,
        account_id: &AccountId,
        reset_token: &str,
    ) -> AuthResult<bool>;

    /// Replace the password hash and clear any outstanding reset token
    async fn update_password(
        &self,
        account_id: &AccountId,
        password_hash: &PasswordHash,
    ) -> AuthResult<()>;

    /// Attach a Google subject id to an existing account
    async fn attach_google_id(
        &self,
        account_id: &AccountId,
        google_id: &GoogleId,
    ) -> AuthResult<()>;
}
