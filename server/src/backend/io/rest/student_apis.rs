//! # REST API for the Student Dashboard
//!
//! Every endpoint here requires a student session.

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use log::info;

use crate::backend::io::rest::{error::ApiError, session::CurrentUser};
use crate::backend::AppState;
use shared::{
    Announcement, Assignment, Course, Role, ScheduleItem, SendMessageRequest, SendMessageResponse,
    StudentStats, TeacherContact,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/assignments", get(get_assignments))
        .route("/courses", get(get_courses))
        .route("/stats", get(get_stats))
        .route("/schedule", get(get_schedule))
        .route("/announcements", get(get_announcements))
        .route("/teachers", get(get_teachers))
        .route("/send_message", post(send_message))
}

pub async fn get_assignments(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Vec<Assignment>>, ApiError> {
    current.require(Role::Student)?;
    Ok(Json(state.dashboard_service.assignments()))
}

pub async fn get_courses(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Vec<Course>>, ApiError> {
    current.require(Role::Student)?;
    Ok(Json(state.dashboard_service.courses()))
}

pub async fn get_stats(State(state): State<AppState>, current: CurrentUser) -> Result<Json<StudentStats>, ApiError> {
    current.require(Role::Student)?;
    Ok(Json(state.dashboard_service.stats()))
}

pub async fn get_schedule(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Vec<ScheduleItem>>, ApiError> {
    current.require(Role::Student)?;
    Ok(Json(state.dashboard_service.schedule()))
}

pub async fn get_announcements(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Vec<Announcement>>, ApiError> {
    current.require(Role::Student)?;
    Ok(Json(state.dashboard_service.announcements()))
}

/// Teachers the student can message
pub async fn get_teachers(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Vec<TeacherContact>>, ApiError> {
    current.require(Role::Student)?;
    Ok(Json(state.messaging_service.list_teachers().await?))
}

pub async fn send_message(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<SendMessageResponse>, ApiError> {
    let student = current.require(Role::Student)?;
    info!("POST /api/student/send_message - from {} to {}", student.id, request.receiver_id);
    Ok(Json(state.messaging_service.send_to_teacher(student, request).await?))
}
