//! Health Handler

use axum::{extract::State, http::StatusCode, Json};

use crate::infrastructure::driving_adapters::api_rest::dto::HealthResponseDto;
use crate::infrastructure::driving_adapters::api_rest::AppState;

/// GET /health - Liveness plus a record store round trip
///
/// # Responses
///
/// * 200 OK - `{"status": "ok", "database": "connected"}`
/// * 503 Service Unavailable - Record store unreachable
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponseDto>) {
    match state.check_store_health_use_case.execute().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponseDto {
                status: "ok".to_string(),
                database: "connected".to_string(),
            }),
        ),
        Err(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponseDto {
                status: "degraded".to_string(),
                database: "unavailable".to_string(),
            }),
        ),
    }
}
