use axum::{Router, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub mod root;
pub mod stream;

pub use root::{health_check_route, root_route};
pub use stream::stream_route;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_route))
        .route("/health", get(health_check_route))
        .route("/api/stream", get(stream_route))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
