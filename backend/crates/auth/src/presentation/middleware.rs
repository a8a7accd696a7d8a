//! Auth Middleware
//!
//! Bearer access-token verification and IP-keyed rate limiting.

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use platform::client::extract_client_ip;
use platform::rate_limit::{RateLimitConfig, RateLimitStore};

use crate::domain::gateway::MailGateway;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::account_id::AccountId;
use crate::error::AuthError;
use crate::presentation::handlers::AppState;

/// Authenticated caller identity, inserted into request extensions by
/// [`require_auth`]
#[derive(Debug, Clone, Copy)]
pub struct CurrentAccount(pub AccountId);

/// Requests per minute allowed on the auth router, per client IP
const AUTH_RATE_LIMIT: u32 = 50;

/// Middleware that requires a valid Bearer access token
pub async fn require_auth<R, M>(
    State(state): State<AppState<R, M>>,
    mut req: Request,
    next: Next,
) -> Response
where
    R: AccountRepository + Send + Sync + 'static,
    M: MailGateway + Send + Sync + 'static,
{
    let authorization = match req.headers().get(header::AUTHORIZATION) {
        Some(value) => value,
        None => {
            tracing::warn!("No authorization header provided");
            return AuthError::AccessTokenMissing.into_response();
        }
    };

    let authorization = match authorization.to_str() {
        Ok(value) => value,
        Err(_) => return AuthError::AccessTokenMissing.into_response(),
    };

    let access_token = match authorization.split_once(' ') {
        Some(("Bearer", token)) => token,
        _ => {
            tracing::warn!("Invalid authorization scheme");
            return AuthError::InvalidAuthScheme.into_response();
        }
    };

    let claims = match state.tokens.verify_access_token(access_token) {
        Ok(claims) => claims,
        Err(e) => return AuthError::from(e).into_response(),
    };

    req.extensions_mut()
        .insert(CurrentAccount(AccountId::from_uuid(claims.sub)));

    next.run(req).await
}

/// Middleware applying a fixed-window rate limit keyed by client IP
pub async fn rate_limit<R, M>(
    State(state): State<AppState<R, M>>,
    req: Request,
    next: Next,
) -> Response
where
    R: AccountRepository + Send + Sync + 'static,
    M: MailGateway + Send + Sync + 'static,
{
    let direct_ip = req
        .extensions()
        .get::<axum::extract::ConnectInfo<std::net::SocketAddr>>()
        .map(|info| info.0.ip());

    let key = match extract_client_ip(req.headers(), direct_ip) {
        Some(ip) => format!("auth:{}", ip),
        None => "auth:unknown".to_string(),
    };

    let config = RateLimitConfig::new(AUTH_RATE_LIMIT, 60);

    let result = match state.limiter.check_and_increment(&key, &config).await {
        Ok(result) => result,
        Err(e) => {
            return AuthError::Internal(format!("Rate limiter failure: {}", e)).into_response();
        }
    };

    if !result.allowed {
        let mut response = AuthError::RateLimited.into_response();
        if let Ok(value) = result.retry_after_secs().to_string().parse() {
            response.headers_mut().insert(header::RETRY_AFTER, value);
        }
        return response;
    }

    next.run(req).await
}
