use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    error::ApiError,
    models::stream::validate_stream_query,
    resolver::MusicResolver,
};

pub struct StreamController;

impl StreamController {
    /// Validates the query and hands the single `songMid` to the resolver.
    /// Whatever the resolver answers is returned untouched; its failures are
    /// passed through as [`ApiError::Upstream`].
    pub async fn stream(
        resolver: &dyn MusicResolver,
        raw_query: Option<&str>,
    ) -> Result<Value, ApiError> {
        let query = validate_stream_query(raw_query).inspect_err(|_| {
            warn!("Rejected stream query: {:?}", raw_query);
        })?;

        debug!("Resolving stream for songMid={}", query.song_mid);
        let resolved = resolver.resolve(vec![query.song_mid]).await?;
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{ResolveError, testing::RecordingResolver};
    use serde_json::json;

    fn url_resolver() -> RecordingResolver {
        RecordingResolver::new(|song_mids| {
            Ok(json!({ "url": format!("https://example/{}.mp3", song_mids[0]) }))
        })
    }

    #[tokio::test]
    async fn resolves_a_valid_song_mid_once() {
        let resolver = url_resolver();

        let result = StreamController::stream(&resolver, Some("songMid=abc123"))
            .await
            .unwrap();

        assert_eq!(result, json!({ "url": "https://example/abc123.mp3" }));
        assert_eq!(resolver.calls(), vec![vec!["abc123".to_string()]]);
    }

    #[tokio::test]
    async fn invalid_query_never_reaches_the_resolver() {
        let resolver = url_resolver();

        for raw in [None, Some(""), Some("songMid="), Some("songMid=a&songMid=b")] {
            let err = StreamController::stream(&resolver, raw).await.unwrap_err();
            assert!(matches!(err, ApiError::InvalidParams));
        }
        assert!(resolver.calls().is_empty());
    }

    #[tokio::test]
    async fn repeated_requests_are_not_cached() {
        let resolver = url_resolver();

        for _ in 0..2 {
            StreamController::stream(&resolver, Some("songMid=abc123"))
                .await
                .unwrap();
        }

        assert_eq!(resolver.calls().len(), 2);
    }

    #[tokio::test]
    async fn resolver_failures_pass_through() {
        let resolver = RecordingResolver::new(|_| {
            Err(ResolveError::Status {
                status: 404,
                body: "not found".to_string(),
            })
        });

        let err = StreamController::stream(&resolver, Some("songMid=gone"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ApiError::Upstream(ResolveError::Status { status: 404, .. })
        ));
        assert_eq!(resolver.calls().len(), 1);
    }
}
