use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use log::info;

use crate::backend::io::rest::{error::ApiError, session::CurrentUser};
use crate::backend::AppState;
use shared::{MarkAbsentRequest, MarkAbsentResponse, Role, TeacherStatus};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/teachers", get(get_teachers))
        .route("/mark_absent", post(mark_teacher_absent))
}

pub async fn get_teachers(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Vec<TeacherStatus>>, ApiError> {
    current.require(Role::Admin)?;
    Ok(Json(state.admin_service.list_teachers().await?))
}

pub async fn mark_teacher_absent(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(request): Json<MarkAbsentRequest>,
) -> Result<Json<MarkAbsentResponse>, ApiError> {
    current.require(Role::Admin)?;
    info!("POST /api/admin/mark_absent - teacher: {}", request.teacher_username);
    Ok(Json(state.admin_service.mark_teacher_absent(&request.teacher_username).await?))
}
