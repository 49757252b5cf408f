use axum::response::{IntoResponse, Json};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up")
    )
)]
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "OK" }))
}
