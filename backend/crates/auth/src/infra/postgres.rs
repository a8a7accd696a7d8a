//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{Account, Profile, StoredCredentials};
use crate::domain::repository::{AccountRepository, DuplicateIdentity};
use crate::domain::value_object::{
    account_id::AccountId, email::Email, google_id::GoogleId, password::PasswordHash, role::Role,
    user_name::UserName,
};
use crate::error::{AuthError, AuthResult};

/// Columns safe to return from default account reads. The sensitive
/// columns are only touched by `credentials()` and the targeted writes.
const ACCOUNT_COLUMNS: &str = r#"
    account_id,
    email,
    username,
    google_id,
    user_role,
    display_name,
    business_name,
    address,
    phone_number,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed account repository
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl AccountRepository for PgAccountRepository {
    async fn create(
        &self,
        account: &Account,
        password_hash: Option<&PasswordHash>,
    ) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO accounts (
                account_id,
                email,
                username,
                google_id,
                user_role,
                password_hash,
                display_name,
                business_name,
                address,
                phone_number,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(account.account_id.as_uuid())
        .bind(account.email.as_str())
        .bind(account.username.as_ref().map(|u| u.as_str()))
        .bind(account.google_id.as_ref().map(|g| g.as_str()))
        .bind(account.role.id())
        .bind(password_hash.map(|h| h.as_phc_string()))
        .bind(&account.profile.display_name)
        .bind(&account.profile.business_name)
        .bind(&account.profile.address)
        .bind(&account.profile.phone_number)
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, account_id: &AccountId) -> AuthResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {} FROM accounts WHERE account_id = $1",
            ACCOUNT_COLUMNS
        ))
        .bind(account_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AccountRow::into_account))
    }

    async fn find_by_identifier(&self, identifier: &str) -> AuthResult<Option<Account>> {
        // Email first; both columns are unique so at most one row matches
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {} FROM accounts WHERE email = lower($1) OR username = $1",
            ACCOUNT_COLUMNS
        ))
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AccountRow::into_account))
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {} FROM accounts WHERE email = $1",
            ACCOUNT_COLUMNS
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AccountRow::into_account))
    }

    async fn find_by_google_id(&self, google_id: &GoogleId) -> AuthResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {} FROM accounts WHERE google_id = $1",
            ACCOUNT_COLUMNS
        ))
        .bind(google_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AccountRow::into_account))
    }

    async fn duplicate_identity(
        &self,
        email: &Email,
        username: Option<&UserName>,
    ) -> AuthResult<Option<DuplicateIdentity>> {
        let (email_taken, username_taken) = sqlx::query_as::<_, (bool, bool)>(
            r#"
            SELECT
                EXISTS(SELECT 1 FROM accounts WHERE email = $1),
                EXISTS(SELECT 1 FROM accounts WHERE username = $2)
            "#,
        )
        .bind(email.as_str())
        .bind(username.map(|u| u.as_str()))
        .fetch_one(&self.pool)
        .await?;

        if email_taken {
            Ok(Some(DuplicateIdentity::Email))
        } else if username_taken {
            Ok(Some(DuplicateIdentity::Username))
        } else {
            Ok(None)
        }
    }

    async fn credentials(&self, account_id: &AccountId) -> AuthResult<Option<StoredCredentials>> {
        let row = sqlx::query_as::<_, CredentialsRow>(
            r#"
            SELECT
                password_hash,
                refresh_token,
                password_reset_token
            FROM accounts
            WHERE account_id = $1
            "#,
        )
        .bind(account_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(CredentialsRow::into_credentials).transpose()
    }

    async fn store_refresh_token(
        &self,
        account_id: &AccountId,
        refresh_token: &str,
    ) -> AuthResult<()> {
        sqlx::query(
            "UPDATE accounts SET refresh_token = $2, updated_at = $3 WHERE account_id = $1",
        )
        .bind(account_id.as_uuid())
        .bind(refresh_token)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn clear_refresh_token(&self, account_id: &AccountId) -> AuthResult<()> {
        // Zero rows affected is fine: already logged out
        sqlx::query(
            "UPDATE accounts SET refresh_token = NULL, updated_at = $2 WHERE account_id = $1",
        )
        .bind(account_id.as_uuid())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn store_reset_token(
        &self,
        account_id: &AccountId,
        reset_token: &str,
    ) -> AuthResult<bool> {
        let result = sqlx::query(
            "UPDATE accounts SET password_reset_token = $2, updated_at = $3 WHERE account_id = $1",
        )
        .bind(account_id.as_uuid())
        .bind(reset_token)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_password(
        &self,
        account_id: &AccountId,
        password_hash: &PasswordHash,
    ) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE accounts SET
                password_hash = $2,
                password_reset_token = NULL,
                updated_at = $3
            WHERE account_id = $1
            "#,
        )
        .bind(account_id.as_uuid())
        .bind(password_hash.as_phc_string())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn attach_google_id(
        &self,
        account_id: &AccountId,
        google_id: &GoogleId,
    ) -> AuthResult<()> {
        sqlx::query("UPDATE accounts SET google_id = $2, updated_at = $3 WHERE account_id = $1")
            .bind(account_id.as_uuid())
            .bind(google_id.as_str())
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    account_id: Uuid,
    email: String,
    username: Option<String>,
    google_id: Option<String>,
    user_role: i16,
    display_name: Option<String>,
    business_name: Option<String>,
    address: Option<String>,
    phone_number: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> Account {
        Account {
            account_id: AccountId::from_uuid(self.account_id),
            email: Email::from_db(self.email),
            username: self.username.map(UserName::from_db),
            google_id: self.google_id.map(GoogleId::from_db),
            role: Role::from_id(self.user_role),
            profile: Profile {
                display_name: self.display_name,
                business_name: self.business_name,
                address: self.address,
                phone_number: self.phone_number,
            },
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CredentialsRow {
    password_hash: Option<String>,
    refresh_token: Option<String>,
    password_reset_token: Option<String>,
}

impl CredentialsRow {
    fn into_credentials(self) -> AuthResult<StoredCredentials> {
        let password_hash = self
            .password_hash
            .map(PasswordHash::from_db)
            .transpose()
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(StoredCredentials {
            password_hash,
            refresh_token: self.refresh_token,
            password_reset_token: self.password_reset_token,
        })
    }
}
