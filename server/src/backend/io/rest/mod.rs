//! # REST API Interface Layer
//!
//! HTTP endpoints of the portal, one router per area, all nested under `/api`.
//! Handlers only translate: they extract the caller and payload, call a
//! domain service and map [`DomainError`](crate::backend::domain::DomainError)
//! to a status code through [`error::ApiError`].

pub mod admin_apis;
pub mod analytics_apis;
pub mod auth_apis;
pub mod booking_apis;
pub mod error;
pub mod logging_apis;
pub mod notification_apis;
pub mod session;
pub mod student_apis;
pub mod teacher_apis;

use axum::{routing::get, Router};

use crate::backend::AppState;

/// All API routes, without middleware or state
pub fn api_router() -> Router<AppState> {
    let api_routes = Router::new()
        .nest("/auth", auth_apis::router())
        .nest("/student", student_apis::router())
        .nest("/teacher", teacher_apis::router())
        .nest("/notifications", notification_apis::router())
        .nest("/bookings", booking_apis::router())
        .route("/timetable", get(booking_apis::get_timetable))
        .nest("/admin", admin_apis::router())
        .nest("/analytics", analytics_apis::router())
        .nest("/logs", logging_apis::router());

    Router::new().nest("/api", api_routes)
}
