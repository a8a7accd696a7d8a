//! Token Service - signed, time-bounded credentials
//!
//! Stateless issuance and verification of the three token classes:
//! - access tokens (short-lived, authorize API calls)
//! - refresh tokens (long-lived, exchanged for new access tokens)
//! - password-reset tokens (short-lived, carried in reset links)
//!
//! Each class signs with its own secret, so a compromised access-token
//! secret cannot forge refresh tokens and no token verifies under
//! another class's verifier. Keys are built once at startup and never
//! mutated.

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::value_object::account_id::AccountId;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Terminal verification failures; both map to an unauthorized outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Token is past its TTL
    #[error("Token has expired")]
    Expired,

    /// Signature or structure is wrong
    #[error("Invalid token")]
    Invalid,
}

/// Claims carried by access and refresh tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Account id the token was issued for
    pub sub: Uuid,
    /// Issued-at (Unix seconds)
    pub iat: i64,
    /// Expiration (Unix seconds)
    pub exp: i64,
}

/// Claims carried by password-reset tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetClaims {
    /// Email of the account the reset was requested for
    pub email: String,
    /// Issued-at (Unix seconds)
    pub iat: i64,
    /// Expiration (Unix seconds)
    pub exp: i64,
}

/// Encoding/decoding key pair for one token class
struct ClassKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl ClassKeys {
    fn from_secret(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

/// Stateless token issuance and verification
pub struct TokenService {
    access: ClassKeys,
    refresh: ClassKeys,
    reset: ClassKeys,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
    reset_ttl_secs: i64,
}

impl TokenService {
    /// Build the service from configured secrets and TTLs
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            access: ClassKeys::from_secret(&config.access_token_secret),
            refresh: ClassKeys::from_secret(&config.refresh_token_secret),
            reset: ClassKeys::from_secret(&config.reset_token_secret),
            access_ttl_secs: config.access_token_ttl.as_secs() as i64,
            refresh_ttl_secs: config.refresh_token_ttl.as_secs() as i64,
            reset_ttl_secs: config.reset_token_ttl.as_secs() as i64,
        }
    }

    // ========================================================================
    // Issuance
    // ========================================================================

    /// Issue a short-lived access token for an account
    pub fn issue_access_token(&self, account_id: &AccountId) -> AuthResult<String> {
        self.issue_session_token(&self.access, self.access_ttl_secs, account_id)
    }

    /// Issue a long-lived refresh token for an account
    pub fn issue_refresh_token(&self, account_id: &AccountId) -> AuthResult<String> {
        self.issue_session_token(&self.refresh, self.refresh_ttl_secs, account_id)
    }

    /// Issue a short-lived password-reset token bound to an email
    pub fn issue_reset_token(&self, email: &Email) -> AuthResult<String> {
        let now = Utc::now().timestamp();
        let claims = ResetClaims {
            email: email.as_str().to_string(),
            iat: now,
            exp: now + self.reset_ttl_secs,
        };

        encode(&Header::default(), &claims, &self.reset.encoding)
            .map_err(|e| AuthError::Internal(format!("Token signing failed: {}", e)))
    }

    fn issue_session_token(
        &self,
        keys: &ClassKeys,
        ttl_secs: i64,
        account_id: &AccountId,
    ) -> AuthResult<String> {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: *account_id.as_uuid(),
            iat: now,
            exp: now + ttl_secs,
        };

        encode(&Header::default(), &claims, &keys.encoding)
            .map_err(|e| AuthError::Internal(format!("Token signing failed: {}", e)))
    }

    // ========================================================================
    // Verification
    // ========================================================================

    /// Verify an access token and return its claims
    pub fn verify_access_token(&self, token: &str) -> Result<SessionClaims, TokenError> {
        Self::verify_session_token(&self.access, token)
    }

    /// Verify a refresh token and return its claims
    pub fn verify_refresh_token(&self, token: &str) -> Result<SessionClaims, TokenError> {
        Self::verify_session_token(&self.refresh, token)
    }

    /// Verify a password-reset token and return its claims
    pub fn verify_reset_token(&self, token: &str) -> Result<ResetClaims, TokenError> {
        decode::<ResetClaims>(token, &self.reset.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(classify)
    }

    fn verify_session_token(keys: &ClassKeys, token: &str) -> Result<SessionClaims, TokenError> {
        decode::<SessionClaims>(token, &keys.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(classify)
    }
}

fn classify(err: jsonwebtoken::errors::Error) -> TokenError {
    match err.kind() {
        JwtErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid,
    }
}
