use crate::types::Credential;
use crate::Result;
use reqwest::Proxy;
use std::env;
use std::time::Duration;

/// Header carrying the provider API key.
pub const API_KEY_HEADER: &str = "x-goog-api-key";

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self> {
        // Overall deadlines are applied per call by the provider; only connection
        // establishment is bounded here.
        let connect_timeout_secs = env::var("AI_HTTP_CONNECT_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(5);

        let mut builder = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .pool_max_idle_per_host(
                env::var("AI_HTTP_POOL_MAX_IDLE_PER_HOST")
                    .ok()
                    .and_then(|s| s.parse::<usize>().ok())
                    .unwrap_or(8),
            )
            .pool_idle_timeout(Some(Duration::from_secs(90)));

        if let Ok(proxy_url) = env::var("AI_PROXY_URL") {
            if let Ok(proxy) = Proxy::all(&proxy_url) {
                builder = builder.proxy(proxy);
            }
        }

        let client = builder
            .build()
            .map_err(|e| crate::Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get_json(&self, path: &str, credential: &Credential) -> Result<serde_json::Value> {
        let request = self.client.get(self.url(path));
        self.execute(request, credential).await
    }

    pub async fn post_json(
        &self,
        path: &str,
        credential: &Credential,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value> {
        let request = self.client.post(self.url(path)).json(body);
        self.execute(request, credential).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send and decode the body as JSON whatever the status: the provider reports
    /// failures as `{"error": {...}}` bodies on non-2xx responses.
    async fn execute(
        &self,
        request: reqwest::RequestBuilder,
        credential: &Credential,
    ) -> Result<serde_json::Value> {
        let response = request
            .header(API_KEY_HEADER, credential.expose())
            .send()
            .await
            .map_err(|e| crate::Error::Transport(TransportError::Http(e)))?;

        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| crate::Error::Transport(TransportError::Http(e)))?;

        serde_json::from_slice(&bytes).map_err(|e| {
            crate::Error::Transport(TransportError::Decode {
                status,
                message: e.to_string(),
            })
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: response body is not JSON ({message})")]
    Decode { status: u16, message: String },

    #[error("Transport error: {0}")]
    Other(String),
}
