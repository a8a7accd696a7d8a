//! Auth Router

use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;

use platform::rate_limit::MemoryRateLimitStore;

use crate::application::config::AuthConfig;
use crate::domain::gateway::MailGateway;
use crate::domain::repository::AccountRepository;
use crate::infra::postgres::PgAccountRepository;
use crate::infra::smtp::SmtpMailGateway;
use crate::presentation::handlers::{self, AppState};
use crate::presentation::middleware;
use crate::token::TokenService;

/// Create the auth router with the PostgreSQL repository and SMTP gateway
pub fn auth_router(
    repo: PgAccountRepository,
    mailer: SmtpMailGateway,
    config: AuthConfig,
) -> Router {
    auth_router_generic(repo, mailer, config)
}

/// Create an auth router for any repository and mail gateway implementation
pub fn auth_router_generic<R, M>(repo: R, mailer: M, config: AuthConfig) -> Router
where
    R: AccountRepository + Send + Sync + 'static,
    M: MailGateway + Send + Sync + 'static,
{
    let tokens = TokenService::new(&config);

    let state = AppState {
        repo: Arc::new(repo),
        mailer: Arc::new(mailer),
        tokens: Arc::new(tokens),
        config: Arc::new(config),
        limiter: Arc::new(MemoryRateLimitStore::new()),
    };

    let protected = Router::new()
        .route("/logout", delete(handlers::logout::<R, M>))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::require_auth::<R, M>,
        ));

    Router::new()
        .route("/sign-up", post(handlers::sign_up::<R, M>))
        .route("/login", post(handlers::login::<R, M>))
        .route("/refresh-token", get(handlers::refresh_token::<R, M>))
        .route("/forgot-password", post(handlers::forgot_password::<R, M>))
        .route("/reset-password", post(handlers::reset_password::<R, M>))
        .route("/auth/google", post(handlers::google_login::<R, M>))
        .merge(protected)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit::<R, M>,
        ))
        .with_state(state)
}
