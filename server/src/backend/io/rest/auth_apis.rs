//! # REST API for Authentication
//!
//! Login sessions are opaque bearer tokens returned by `/login`.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use log::info;

use crate::backend::io::rest::{error::ApiError, session::CurrentUser};
use crate::backend::AppState;
use shared::{AuthStatusResponse, LoginRequest, LoginResponse, SignupRequest, UserProfile};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/signup", post(signup))
        .route("/logout", post(logout))
        .route("/status", get(auth_status))
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    info!("POST /api/auth/login - user: {}", request.username);
    Ok(Json(state.auth_service.login(request).await?))
}

pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<UserProfile>), ApiError> {
    info!("POST /api/auth/signup - user: {}, role: {}", request.username, request.role);
    let profile = state.auth_service.signup(request).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

pub async fn logout(State(state): State<AppState>, current: CurrentUser) -> Result<StatusCode, ApiError> {
    info!("POST /api/auth/logout - user: {}", current.user.username);
    state.auth_service.logout(&current.token).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// 200 with the profile when logged in, 401 with `authenticated: false` otherwise
pub async fn auth_status(current: Option<CurrentUser>) -> (StatusCode, Json<AuthStatusResponse>) {
    match current {
        Some(current) => (
            StatusCode::OK,
            Json(AuthStatusResponse {
                authenticated: true,
                user: Some(current.user.to_profile()),
            }),
        ),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(AuthStatusResponse {
                authenticated: false,
                user: None,
            }),
        ),
    }
}
