//! Bearer-token session extraction.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use crate::backend::domain::{models::User, require_role, DomainError};
use crate::backend::io::rest::error::ApiError;
use crate::backend::AppState;
use shared::Role;

/// The logged-in caller. Rejects with 401 when the request carries no live session.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    pub token: String,
}

impl CurrentUser {
    pub fn require(&self, role: Role) -> Result<&User, ApiError> {
        require_role(&self.user, role)?;
        Ok(&self.user)
    }
}

pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(DomainError::Unauthenticated)?;
        match state.auth_service.resolve_session(&token).await? {
            Some(user) => Ok(CurrentUser { user, token }),
            None => Err(DomainError::Unauthenticated.into()),
        }
    }
}
