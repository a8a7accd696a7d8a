//! Account Entity
//!
//! One record per identity, whether it signs in with credentials, with
//! Google, or both. Sensitive columns (password hash, refresh token,
//! reset token) are not part of this entity; they are loaded separately
//! as [`StoredCredentials`] so default reads never carry them.

use chrono::{DateTime, Utc};

use kernel::error::app_error::{AppError, AppResult};

use crate::domain::value_object::{
    account_id::AccountId, email::Email, google_id::GoogleId, password::PasswordHash, role::Role,
    user_name::UserName,
};

/// Optional profile fields, length-bounded only
#[derive(Debug, Clone, Default)]
pub struct Profile {
    pub display_name: Option<String>,
    pub business_name: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

impl Profile {
    /// Validate length bounds on every provided field
    pub fn new(
        display_name: Option<String>,
        business_name: Option<String>,
        address: Option<String>,
        phone_number: Option<String>,
    ) -> AppResult<Self> {
        let display_name = bounded("displayName", display_name, 100)?;
        let business_name = bounded("businessName", business_name, 100)?;
        let address = bounded("address", address, 200)?;
        let phone_number = bounded("phoneNumber", phone_number, 15)?;

        Ok(Self {
            display_name,
            business_name,
            address,
            phone_number,
        })
    }
}

fn bounded(field: &'static str, value: Option<String>, max: usize) -> AppResult<Option<String>> {
    match value {
        None => Ok(None),
        Some(raw) => {
            let trimmed = raw.trim().to_string();
            if trimmed.is_empty() {
                return Ok(None);
            }
            if trimmed.chars().count() > max {
                return Err(AppError::validation(
                    field,
                    format!("{} must be less than {} characters", field, max),
                ));
            }
            Ok(Some(trimmed))
        }
    }
}

/// Account entity
///
/// Public account state; see [`StoredCredentials`] for the sensitive
/// companion record.
#[derive(Debug, Clone)]
pub struct Account {
    /// Internal UUID identifier
    pub account_id: AccountId,
    /// Unique, case-normalized email
    pub email: Email,
    /// Optional unique login handle
    pub username: Option<UserName>,
    /// Optional unique Google subject id
    pub google_id: Option<GoogleId>,
    /// Role (User, Admin)
    pub role: Role,
    /// Profile fields (length bounds only)
    pub profile: Profile,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account from a local sign-up
    pub fn new(
        email: Email,
        username: Option<UserName>,
        google_id: Option<GoogleId>,
        role: Role,
        profile: Profile,
    ) -> Self {
        let now = Utc::now();

        Self {
            account_id: AccountId::new(),
            email,
            username,
            google_id,
            role,
            profile,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a new account from a verified Google profile
    pub fn new_google(google_id: GoogleId, email: Email, display_name: Option<String>) -> Self {
        let now = Utc::now();

        Self {
            account_id: AccountId::new(),
            email,
            username: None,
            google_id: Some(google_id),
            role: Role::User,
            profile: Profile {
                display_name,
                ..Profile::default()
            },
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach a Google identity to an existing account
    pub fn link_google(&mut self, google_id: GoogleId) {
        self.google_id = Some(google_id);
        self.updated_at = Utc::now();
    }

    /// Handle used when addressing the user in email copy
    pub fn display_handle(&self) -> &str {
        if let Some(username) = &self.username {
            return username.as_str();
        }
        if let Some(display_name) = &self.profile.display_name {
            return display_name;
        }
        self.email.local_part()
    }
}

/// Sensitive companion state for an account
///
/// Fetched only by the explicit `credentials()` repository method; never
/// part of a default account read.
#[derive(Debug, Clone, Default)]
pub struct StoredCredentials {
    /// Argon2id PHC hash; absent for Google-only accounts
    pub password_hash: Option<PasswordHash>,
    /// The single live refresh token, if any
    pub refresh_token: Option<String>,
    /// Outstanding password-reset token, if any
    pub password_reset_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email() -> Email {
        Email::new("user@example.com").unwrap()
    }

    #[test]
    fn test_new_account_defaults() {
        let account = Account::new(email(), None, None, Role::User, Profile::default());
        assert!(account.username.is_none());
        assert!(account.google_id.is_none());
        assert_eq!(account.role, Role::User);
        assert_eq!(account.created_at, account.updated_at);
    }

    #[test]
    fn test_new_google_account_is_user_role() {
        let account = Account::new_google(
            GoogleId::new("g-123").unwrap(),
            email(),
            Some("Alice".to_string()),
        );
        assert_eq!(account.role, Role::User);
        assert!(account.google_id.is_some());
        assert_eq!(account.profile.display_name.as_deref(), Some("Alice"));
    }

    #[test]
    fn test_link_google_touches_updated_at() {
        let mut account = Account::new(email(), None, None, Role::User, Profile::default());
        let before = account.updated_at;
        account.link_google(GoogleId::new("g-456").unwrap());
        assert!(account.google_id.is_some());
        assert!(account.updated_at >= before);
    }

    #[test]
    fn test_display_handle_preference_order() {
        let mut account = Account::new(
            email(),
            Some(UserName::new("alice").unwrap()),
            None,
            Role::User,
            Profile {
                display_name: Some("Alice B".to_string()),
                ..Profile::default()
            },
        );
        assert_eq!(account.display_handle(), "alice");

        account.username = None;
        assert_eq!(account.display_handle(), "Alice B");

        account.profile.display_name = None;
        assert_eq!(account.display_handle(), "user");
    }

    #[test]
    fn test_profile_bounds() {
        assert!(Profile::new(Some("a".repeat(101)), None, None, None).is_err());
        assert!(Profile::new(None, Some("a".repeat(101)), None, None).is_err());
        assert!(Profile::new(None, None, Some("a".repeat(201)), None).is_err());
        assert!(Profile::new(None, None, None, Some("1".repeat(16))).is_err());

        let profile = Profile::new(
            Some("Alice".to_string()),
            None,
            Some("1 Main St".to_string()),
            Some("5551234".to_string()),
        )
        .unwrap();
        assert_eq!(profile.display_name.as_deref(), Some("Alice"));
    }

    #[test]
    fn test_profile_blank_becomes_none() {
        let profile = Profile::new(Some("   ".to_string()), None, None, None).unwrap();
        assert!(profile.display_name.is_none());
    }
}
