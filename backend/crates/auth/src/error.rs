//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::token::TokenError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Bad credentials. Deliberately identical for an unknown identifier
    /// and a wrong password (anti-enumeration).
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Email already registered
    #[error("Email is already in use")]
    EmailTaken,

    /// Username already registered
    #[error("Username is already in use")]
    UsernameTaken,

    /// Admin self-registration outside the allow-list
    #[error("Email is not authorized to register as admin")]
    AdminNotAllowed,

    /// Token past its TTL
    #[error("Token has expired")]
    TokenExpired,

    /// Token signature or structure is wrong
    #[error("Invalid token")]
    TokenInvalid,

    /// Refresh cookie absent from the request
    #[error("Refresh token not found")]
    RefreshTokenMissing,

    /// Refresh token verified but rejected (account gone, or the stored
    /// token has been rotated since this one was issued)
    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    /// Bearer access token absent from the Authorization header
    #[error("Access token is missing")]
    AccessTokenMissing,

    /// Authorization header present but not a Bearer scheme
    #[error("Invalid authorization scheme")]
    InvalidAuthScheme,

    /// Logout called without an authenticated caller identity
    #[error("A user identity is required for logout")]
    CallerRequired,

    /// Forgot-password for an unregistered email (existence is
    /// intentionally revealed here, unlike login)
    #[error("User with this email does not exist")]
    EmailNotRegistered,

    /// Reset flow could not find the account named by the token
    #[error("User not found")]
    AccountNotFound,

    /// Reset attempted while no reset token is outstanding (already
    /// consumed, or never requested)
    #[error("Password reset token not set")]
    ResetTokenNotSet,

    /// Reset token verified but carries no usable email claim
    #[error("Invalid token payload: email is missing")]
    ResetPayloadInvalid,

    /// Mail gateway failed or reported no delivery id
    #[error("Failed to send password reset email: {0}")]
    MailDelivery(String),

    /// Rate limit exceeded
    #[error("Too many requests. Please try again later.")]
    RateLimited,

    /// Validation or other pre-classified application error
    #[error("{0}")]
    Validation(AppError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials
            | AuthError::TokenExpired
            | AuthError::TokenInvalid
            | AuthError::RefreshTokenMissing
            | AuthError::InvalidRefreshToken
            | AuthError::AccessTokenMissing
            | AuthError::InvalidAuthScheme => ErrorKind::Unauthorized,
            AuthError::EmailTaken | AuthError::UsernameTaken => ErrorKind::Conflict,
            AuthError::AdminNotAllowed => ErrorKind::Forbidden,
            AuthError::CallerRequired
            | AuthError::ResetTokenNotSet
            | AuthError::ResetPayloadInvalid => ErrorKind::BadRequest,
            AuthError::EmailNotRegistered | AuthError::AccountNotFound => ErrorKind::NotFound,
            AuthError::RateLimited => ErrorKind::TooManyRequests,
            AuthError::Validation(err) => err.kind(),
            AuthError::MailDelivery(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError for the wire
    ///
    /// Server-side failures are normalized to generic messages; the
    /// detail stays in the log output only.
    pub fn into_app_error(self) -> AppError {
        match self {
            AuthError::Validation(err) => err,
            AuthError::MailDelivery(_) => {
                AppError::internal("Failed to send password reset email")
            }
            AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::internal("Internal Server Error")
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::MailDelivery(detail) => {
                tracing::error!(detail = %detail, "Mail gateway failure");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidRefreshToken => {
                tracing::warn!("Rejected refresh token");
            }
            AuthError::RateLimited => {
                tracing::warn!("Rate limit exceeded");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Validation(err)
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => AuthError::TokenExpired,
            TokenError::Invalid => AuthError::TokenInvalid,
        }
    }
}
