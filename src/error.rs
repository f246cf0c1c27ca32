use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use tracing::error;

use crate::resolver::ResolveError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid params")]
    InvalidParams,
    #[error(transparent)]
    Upstream(#[from] ResolveError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidParams => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            ApiError::InvalidParams => self.to_string(),
            // Upstream causes stay in the logs.
            ApiError::Upstream(e) => {
                error!("Resolver failed: {}", e);
                "Internal Server Error".to_string()
            }
        };
        (
            status,
            Json(json!({ "statusCode": status.as_u16(), "message": message })),
        )
            .into_response()
    }
}
