//! # REST API for Teacher Messaging
//!
//! Inbox, per-student conversations, replies and read tracking. Every
//! endpoint requires a teacher session.

use axum::{
    extract::{Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use log::info;
use serde::Deserialize;

use crate::backend::io::rest::{error::ApiError, session::CurrentUser};
use crate::backend::AppState;
use shared::{
    ConversationMessage, InboxMessage, MarkConversationReadRequest, MarkMessageReadRequest, MarkReadResponse,
    Role, SendMessageResponse, StudentContact, TeacherSendMessageRequest,
};

#[derive(Debug, Deserialize)]
pub struct ConversationQuery {
    pub student_id: Option<u32>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/messages", get(get_inbox))
        .route("/conversation", get(get_conversation))
        .route("/send_message", post(send_message))
        .route("/mark_message_read", post(mark_message_read))
        .route("/mark_conversation_read", post(mark_conversation_read))
        .route("/students", get(get_students))
}

pub async fn get_inbox(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Vec<InboxMessage>>, ApiError> {
    let teacher = current.require(Role::Teacher)?;
    info!("GET /api/teacher/messages - teacher: {}", teacher.id);
    Ok(Json(state.messaging_service.inbox(teacher).await?))
}

pub async fn get_conversation(
    State(state): State<AppState>,
    current: CurrentUser,
    Query(query): Query<ConversationQuery>,
) -> Result<Json<Vec<ConversationMessage>>, ApiError> {
    let teacher = current.require(Role::Teacher)?;
    let student_id = query
        .student_id
        .ok_or_else(|| ApiError::bad_request("Missing student_id parameter"))?;
    info!("GET /api/teacher/conversation - teacher: {}, student: {}", teacher.id, student_id);
    Ok(Json(state.messaging_service.conversation(teacher, student_id).await?))
}

pub async fn send_message(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(request): Json<TeacherSendMessageRequest>,
) -> Result<Json<SendMessageResponse>, ApiError> {
    let teacher = current.require(Role::Teacher)?;
    info!("POST /api/teacher/send_message - from {} to {}", teacher.id, request.student_id);
    Ok(Json(state.messaging_service.send_to_student(teacher, request).await?))
}

pub async fn mark_message_read(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(request): Json<MarkMessageReadRequest>,
) -> Result<Json<MarkReadResponse>, ApiError> {
    current.require(Role::Teacher)?;
    Ok(Json(state.messaging_service.mark_message_read(request.message_id).await?))
}

pub async fn mark_conversation_read(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(request): Json<MarkConversationReadRequest>,
) -> Result<Json<MarkReadResponse>, ApiError> {
    let teacher = current.require(Role::Teacher)?;
    Ok(Json(
        state
            .messaging_service
            .mark_conversation_read(teacher, request.student_id)
            .await?,
    ))
}

pub async fn get_students(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Vec<StudentContact>>, ApiError> {
    let teacher = current.require(Role::Teacher)?;
    Ok(Json(state.messaging_service.list_students(teacher).await?))
}
