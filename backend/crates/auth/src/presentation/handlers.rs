//! HTTP Handlers
//!
//! The boundary owns the refresh cookie: every flow that opens a session
//! sets it, logout clears it. Tokens themselves come from the use cases.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::Extension;
use std::sync::Arc;

use platform::cookie::extract_cookie;
use platform::rate_limit::MemoryRateLimitStore;

use crate::application::config::AuthConfig;
use crate::application::{
    ForgotPasswordInput, ForgotPasswordUseCase, GoogleLoginUseCase, GoogleProfile, LoginInput,
    LoginUseCase, LogoutUseCase, RefreshUseCase, ResetPasswordInput, ResetPasswordUseCase,
    SignUpInput, SignUpUseCase,
};
use crate::domain::gateway::MailGateway;
use crate::domain::repository::AccountRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    AuthResponse, ForgotPasswordRequest, GoogleProfileRequest, LoginRequest, MessageResponse,
    PublicUser, RefreshResponse, ResetPasswordQuery, ResetPasswordRequest, SignUpRequest,
};
use crate::presentation::middleware::CurrentAccount;
use crate::token::TokenService;

/// Shared state for auth handlers
pub struct AppState<R, M>
where
    R: AccountRepository + Send + Sync + 'static,
    M: MailGateway + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub mailer: Arc<M>,
    pub tokens: Arc<TokenService>,
    pub config: Arc<AuthConfig>,
    pub limiter: Arc<MemoryRateLimitStore>,
}

// Manual impl: Arc fields are clonable regardless of R and M
impl<R, M> Clone for AppState<R, M>
where
    R: AccountRepository + Send + Sync + 'static,
    M: MailGateway + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            mailer: self.mailer.clone(),
            tokens: self.tokens.clone(),
            config: self.config.clone(),
            limiter: self.limiter.clone(),
        }
    }
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /sign-up
pub async fn sign_up<R, M>(
    State(state): State<AppState<R, M>>,
    Json(req): Json<SignUpRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: AccountRepository + Send + Sync + 'static,
    M: MailGateway + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(state.repo.clone(), state.tokens.clone(), state.config.clone());

    let input = SignUpInput {
        email: req.email,
        username: req.username,
        password: req.password,
        google_id: req.google_id,
        role: req.role,
        display_name: req.display_name,
        business_name: req.business_name,
        address: req.address,
        phone_number: req.phone_number,
    };

    let output = use_case.execute(input).await?;

    let cookie = state.config.refresh_cookie().build_set_cookie(&output.refresh_token);

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie)],
        Json(AuthResponse {
            user: PublicUser::from(&output.account),
            access_token: output.access_token,
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /login
pub async fn login<R, M>(
    State(state): State<AppState<R, M>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: AccountRepository + Send + Sync + 'static,
    M: MailGateway + Send + Sync + 'static,
{
    let identifier = req
        .identifier()
        .ok_or_else(|| {
            AuthError::Validation(kernel::error::app_error::AppError::validation(
                "identifier",
                "Either email or username is required",
            ))
        })?
        .to_string();

    let use_case = LoginUseCase::new(state.repo.clone(), state.tokens.clone(), state.config.clone());

    let output = use_case
        .execute(LoginInput {
            identifier,
            password: req.password,
        })
        .await?;

    let cookie = state.config.refresh_cookie().build_set_cookie(&output.refresh_token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(AuthResponse {
            user: PublicUser::from(&output.account),
            access_token: output.access_token,
        }),
    ))
}

// ============================================================================
// Logout
// ============================================================================

/// DELETE /logout (requires Bearer access token)
pub async fn logout<R, M>(
    State(state): State<AppState<R, M>>,
    current: Option<Extension<CurrentAccount>>,
) -> AuthResult<impl IntoResponse>
where
    R: AccountRepository + Send + Sync + 'static,
    M: MailGateway + Send + Sync + 'static,
{
    let use_case = LogoutUseCase::new(state.repo.clone());

    use_case
        .execute(current.map(|Extension(CurrentAccount(id))| id))
        .await?;

    let cookie = state.config.refresh_cookie().build_delete_cookie();

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(MessageResponse {
            message: "Logged out successfully".to_string(),
        }),
    ))
}

// ============================================================================
// Refresh
// ============================================================================

/// GET /refresh-token (reads the refresh cookie)
pub async fn refresh_token<R, M>(
    State(state): State<AppState<R, M>>,
    headers: HeaderMap,
) -> AuthResult<Json<RefreshResponse>>
where
    R: AccountRepository + Send + Sync + 'static,
    M: MailGateway + Send + Sync + 'static,
{
    let refresh_token = extract_cookie(&headers, &state.config.refresh_cookie_name)
        .ok_or(AuthError::RefreshTokenMissing)?;

    let use_case = RefreshUseCase::new(state.repo.clone(), state.tokens.clone());

    let output = use_case.execute(&refresh_token).await?;

    Ok(Json(RefreshResponse {
        access_token: output.access_token,
    }))
}

// ============================================================================
// Google login
// ============================================================================

/// POST /auth/google
///
/// Terminates the externally-driven OAuth handshake: the caller hands
/// over the verified profile, and this boundary issues session tokens
/// and sets the cookie exactly as a credential login does.
pub async fn google_login<R, M>(
    State(state): State<AppState<R, M>>,
    Json(req): Json<GoogleProfileRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: AccountRepository + Send + Sync + 'static,
    M: MailGateway + Send + Sync + 'static,
{
    let use_case = GoogleLoginUseCase::new(state.repo.clone());

    let account = use_case
        .execute(GoogleProfile {
            google_id: req.google_id,
            email: req.email,
            display_name: req.display_name,
        })
        .await?;

    let access_token = state.tokens.issue_access_token(&account.account_id)?;
    let refresh_token = state.tokens.issue_refresh_token(&account.account_id)?;

    state
        .repo
        .store_refresh_token(&account.account_id, &refresh_token)
        .await?;

    tracing::info!(email = %account.email, "User logged in with Google");

    let cookie = state.config.refresh_cookie().build_set_cookie(&refresh_token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(AuthResponse {
            user: PublicUser::from(&account),
            access_token,
        }),
    ))
}

// ============================================================================
// Password reset
// ============================================================================

/// POST /forgot-password
pub async fn forgot_password<R, M>(
    State(state): State<AppState<R, M>>,
    Json(req): Json<ForgotPasswordRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: AccountRepository + Send + Sync + 'static,
    M: MailGateway + Send + Sync + 'static,
{
    let use_case = ForgotPasswordUseCase::new(
        state.repo.clone(),
        state.mailer.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(ForgotPasswordInput { email: req.email })
        .await?;

    Ok(Json(MessageResponse {
        message: format!("Password reset link sent to {}", output.email),
    }))
}

/// POST /reset-password?token=...
pub async fn reset_password<R, M>(
    State(state): State<AppState<R, M>>,
    Query(query): Query<ResetPasswordQuery>,
    Json(req): Json<ResetPasswordRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: AccountRepository + Send + Sync + 'static,
    M: MailGateway + Send + Sync + 'static,
{
    let use_case = ResetPasswordUseCase::new(
        state.repo.clone(),
        state.mailer.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    use_case
        .execute(ResetPasswordInput {
            token: query.token,
            password: req.password,
        })
        .await?;

    Ok(Json(MessageResponse {
        message: "Password reset successful".to_string(),
    }))
}
