use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[tracing::instrument(name = "GET /health")]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
