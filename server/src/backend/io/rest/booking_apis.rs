//! # REST API for Timetable and Classroom Bookings

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use log::info;
use serde::Deserialize;

use crate::backend::io::rest::{error::ApiError, session::CurrentUser};
use crate::backend::AppState;
use shared::{BookingRequest, BookingResponse, TimetableEntry, UnavailableSlotsResponse};

#[derive(Debug, Deserialize)]
pub struct UnavailableQuery {
    pub classroom: Option<String>,
    pub date: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(book_classroom))
        .route("/unavailable", get(get_unavailable_slots))
}

pub async fn get_timetable(State(state): State<AppState>) -> Result<Json<Vec<TimetableEntry>>, ApiError> {
    info!("GET /api/timetable");
    Ok(Json(state.timetable_service.list().await?))
}

/// Periods already taken for a classroom on the weekday of `date`.
/// Without both parameters the list is empty.
pub async fn get_unavailable_slots(
    State(state): State<AppState>,
    Query(query): Query<UnavailableQuery>,
) -> Result<Json<UnavailableSlotsResponse>, ApiError> {
    info!("GET /api/bookings/unavailable - query: {:?}", query);

    match (query.classroom, query.date) {
        (Some(classroom), Some(date)) if !classroom.is_empty() && !date.is_empty() => Ok(Json(
            state.timetable_service.unavailable_slots(&classroom, &date).await?,
        )),
        (classroom, date) => Ok(Json(UnavailableSlotsResponse {
            classroom: classroom.unwrap_or_default(),
            date: date.unwrap_or_default(),
            weekday: String::new(),
            unavailable_slots: Vec::new(),
        })),
    }
}

pub async fn book_classroom(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(request): Json<BookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), ApiError> {
    info!("POST /api/bookings - user: {}, request: {:?}", current.user.username, request);
    let response = state.timetable_service.book(&current.user, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}
