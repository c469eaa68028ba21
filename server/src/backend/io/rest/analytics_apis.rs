use axum::{extract::State, response::Json, routing::get, Router};

use crate::backend::AppState;
use shared::AnalyticsChartsResponse;

pub fn router() -> Router<AppState> {
    Router::new().route("/charts", get(get_charts))
}

/// Chart specs rendered by the analytics page
pub async fn get_charts(State(state): State<AppState>) -> Json<AnalyticsChartsResponse> {
    Json(state.dashboard_service.analytics_charts())
}
