use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub max_attempts: u32,
}

pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let status = if state.shutdown.is_cancelled() {
        "shutting_down"
    } else {
        "healthy"
    };

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: status.to_string(),
            max_attempts: state.transcription_service.policy().max_attempts(),
        }),
    )
}
