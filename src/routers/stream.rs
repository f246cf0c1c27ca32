use axum::{
    Json,
    extract::{RawQuery, State},
};
use serde_json::Value;

use crate::{controllers::StreamController, error::ApiError, state::AppState};

pub async fn stream_route(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<Value>, ApiError> {
    StreamController::stream(state.resolver.as_ref(), query.as_deref())
        .await
        .map(Json)
}
