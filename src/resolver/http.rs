use std::time::Duration;

use anyhow::{Context, bail};
use futures::{FutureExt, future::BoxFuture};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::{MusicResolver, ResolveError};
use crate::secrets::SecretManager;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Upper bound on how much of an error body is kept and logged.
const MAX_ERROR_BODY_BYTES: usize = 1024;

fn truncate_error_body(mut body: String) -> String {
    if body.len() > MAX_ERROR_BODY_BYTES {
        let mut end = MAX_ERROR_BODY_BYTES;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        body.truncate(end);
    }
    body
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolveRequest<'a> {
    song_mids: &'a [String],
}

/// Forwards song ids to an upstream song-URL service and returns its JSON
/// answer untouched.
pub struct HttpMusicResolver {
    client: Client,
    endpoint: Url,
}

impl HttpMusicResolver {
    pub fn new(endpoint: &str, timeout: Duration) -> anyhow::Result<Self> {
        let endpoint = Url::parse(endpoint)
            .with_context(|| format!("Invalid resolver URL {:?}", endpoint))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            bail!("Resolver URL must be http or https, got {}", endpoint.scheme());
        }

        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(3))
            .timeout(timeout)
            .build()?;

        Ok(Self::with_client(client, endpoint))
    }

    fn with_client(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    pub fn from_secrets(secrets: &SecretManager) -> anyhow::Result<Self> {
        let timeout = secrets
            .get_parsed::<u64>("RESOLVER_TIMEOUT_SECS")
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Self::new(&secrets.get("RESOLVER_URL"), Duration::from_secs(timeout))
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl MusicResolver for HttpMusicResolver {
    fn resolve(&self, song_mids: Vec<String>) -> BoxFuture<'_, Result<Value, ResolveError>> {
        async move {
            if song_mids.is_empty() {
                return Err(ResolveError::Empty);
            }
            debug!("Resolving {:?} via {}", song_mids, self.endpoint);

            let response = self
                .client
                .post(self.endpoint.clone())
                .json(&ResolveRequest { song_mids: &song_mids })
                .send()
                .await
                .map_err(ResolveError::Request)?;

            let status = response.status();
            let body = response.text().await.map_err(ResolveError::Request)?;
            if !status.is_success() {
                return Err(ResolveError::Status {
                    status: status.as_u16(),
                    body: truncate_error_body(body),
                });
            }

            serde_json::from_str(&body).map_err(ResolveError::Decode)
        }
        .boxed()
    }
}
