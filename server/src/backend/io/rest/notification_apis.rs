use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};

use crate::backend::io::rest::{error::ApiError, session::CurrentUser};
use crate::backend::AppState;
use shared::{MarkReadResponse, NotificationListResponse};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_unread))
        .route("/read", post(mark_all_read))
}

/// Unread notifications of the caller
pub async fn list_unread(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<NotificationListResponse>, ApiError> {
    let notifications = state.notification_service.unread_for(current.user.id).await?;
    Ok(Json(NotificationListResponse { notifications }))
}

pub async fn mark_all_read(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<MarkReadResponse>, ApiError> {
    let updated = state.notification_service.mark_all_read(current.user.id).await?;
    Ok(Json(MarkReadResponse {
        success: true,
        message: format!("Marked {} notifications as read", updated),
    }))
}
