use axum::{response::Json, routing::post, Router};
use log::{debug, error, info, warn};

use crate::backend::AppState;
use shared::{LogEntry, LogResponse};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(log_message))
}

/// Write a frontend log line into the server log
pub async fn log_message(Json(request): Json<LogEntry>) -> Json<LogResponse> {
    let component = request.component.as_deref().unwrap_or("frontend");
    let message = format!("[{}] {}", component, request.message);

    match request.level.to_lowercase().as_str() {
        "debug" => debug!("{}", message),
        "warn" => warn!("{}", message),
        "error" => error!("{}", message),
        _ => info!("{}", message),
    }

    Json(LogResponse { success: true })
}
