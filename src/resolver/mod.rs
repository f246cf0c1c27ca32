// Song URL resolution seam
use futures::future::BoxFuture;
use serde_json::Value;

pub mod http;

pub use http::HttpMusicResolver;

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("No song ids to resolve")]
    Empty,
    #[error("Resolver request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("Resolver responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Resolver returned a body that is not JSON: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Turns song ids into playable media. The result is opaque to callers and
/// is handed back to clients as-is.
pub trait MusicResolver: Send + Sync {
    fn resolve(&self, song_mids: Vec<String>) -> BoxFuture<'_, Result<Value, ResolveError>>;
}
