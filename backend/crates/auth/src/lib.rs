//! Auth (Account & Session) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database and mail gateway implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Sign-up with email + optional username, credential login
//! - Google login (verified profile resolve / link / create)
//! - Paired access/refresh JWTs, one live refresh token per account
//! - Password-reset email flow with short-lived reset tokens
//! - Role-based registration (admin allow-list)
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (per-record random salt)
//! - One signing secret per token class (access / refresh / reset)
//! - Refresh requires byte-equality with the stored token, so every
//!   rotation revokes previously issued copies
//! - Refresh token delivered only via an http-only SameSite=Strict cookie

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;
pub mod token;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAccountRepository;
pub use infra::smtp::SmtpMailGateway;
pub use presentation::router::auth_router;
pub use token::TokenService;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgAccountRepository as AccountStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
