use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub struct RootController;

impl RootController {
    pub async fn root() -> impl IntoResponse {
        (
            StatusCode::OK,
            Json(json!({
                "service": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
            })),
        )
    }

    pub async fn health_check() -> impl IntoResponse {
        (StatusCode::OK, Json(json!({ "status": "ok" })))
    }
}
