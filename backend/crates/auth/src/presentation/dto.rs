//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entity::Account;

// ============================================================================
// Sign Up
// ============================================================================

/// Sign up request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
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

// ============================================================================
// Login
// ============================================================================

/// Login request: either email or username plus a password
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: String,
}

impl LoginRequest {
    /// The identifier to resolve, email preferred
    pub fn identifier(&self) -> Option<&str> {
        self.email
            .as_deref()
            .or(self.username.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

// ============================================================================
// Password reset
// ============================================================================

/// Forgot password request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Reset password query parameters
#[derive(Debug, Clone, Deserialize)]
pub struct ResetPasswordQuery {
    pub token: String,
}

/// Reset password request body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub password: String,
}

// ============================================================================
// Google
// ============================================================================

/// Verified Google profile, delivered by the external OAuth handshake
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleProfileRequest {
    pub google_id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

// ============================================================================
// Responses
// ============================================================================

/// Public account view: never carries credentials or token state
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub role: String,
}

impl From<&Account> for PublicUser {
    fn from(account: &Account) -> Self {
        Self {
            id: account.account_id.to_string(),
            email: account.email.as_str().to_string(),
            username: account.username.as_ref().map(|u| u.as_str().to_string()),
            display_name: account.profile.display_name.clone(),
            role: account.role.code().to_string(),
        }
    }
}

/// Session response: public user view plus the access token. The refresh
/// token travels only in the Set-Cookie header.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: PublicUser,
    pub access_token: String,
}

/// Refresh response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
}

/// Generic message response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::Profile;
    use crate::domain::value_object::{Email, Role, UserName};

    #[test]
    fn test_login_request_identifier_prefers_email() {
        let req = LoginRequest {
            email: Some("a@x.com".to_string()),
            username: Some("a".to_string()),
            password: "secret1".to_string(),
        };
        assert_eq!(req.identifier(), Some("a@x.com"));

        let req = LoginRequest {
            email: None,
            username: Some("  a  ".to_string()),
            password: "secret1".to_string(),
        };
        assert_eq!(req.identifier(), Some("a"));

        let req = LoginRequest {
            email: None,
            username: None,
            password: "secret1".to_string(),
        };
        assert_eq!(req.identifier(), None);
    }

    #[test]
    fn test_public_user_has_no_sensitive_fields() {
        let account = Account::new(
            Email::new("a@x.com").unwrap(),
            Some(UserName::new("alice").unwrap()),
            None,
            Role::User,
            Profile::default(),
        );
        let user = PublicUser::from(&account);
        let json = serde_json::to_string(&user).unwrap();

        assert!(json.contains("\"email\":\"a@x.com\""));
        assert!(json.contains("\"role\":\"user\""));
        assert!(!json.contains("password"));
        assert!(!json.contains("refresh"));
        assert!(!json.contains("reset"));
    }

    #[test]
    fn test_sign_up_request_accepts_camel_case() {
        let body = r#"{
            "email": "a@x.com",
            "username": "a",
            "password": "secret1",
            "displayName": "Alice",
            "phoneNumber": "5551234"
        }"#;
        let req: SignUpRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.display_name.as_deref(), Some("Alice"));
        assert_eq!(req.phone_number.as_deref(), Some("5551234"));
    }
}
