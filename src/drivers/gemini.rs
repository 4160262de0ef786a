//! Gemini Generate API 驱动 — 模型目录与 generateContent 请求/响应转换
//!
//! Google Gemini (`v1beta`) provider. Key points:
//! - Catalog: `GET /v1beta/models`, entries carry `supportedGenerationMethods`.
//! - Generation: `POST /v1beta/models/{model}:generateContent` with `contents` and
//!   `generationConfig`; text lives at `candidates[0].content.parts[0].text`.
//! - Errors come back as `{"error": {"code", "message", "status"}}` bodies.
//! - The API key travels in the `x-goog-api-key` header.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

use crate::error::{Error, Stage};
use crate::prompt::ComposedPrompt;
use crate::transport::HttpTransport;
use crate::types::{Credential, ModelCatalog};
use crate::Result;

use super::{GenerateResponse, GenerationConfig, ModelProvider};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const API_VERSION_PATH: &str = "/v1beta";

pub struct GeminiProvider {
    transport: HttpTransport,
    catalog_timeout: Duration,
    generation_timeout: Duration,
}

impl GeminiProvider {
    pub fn new(
        base_url: &str,
        catalog_timeout: Duration,
        generation_timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            transport: HttpTransport::new(base_url)?,
            catalog_timeout,
            generation_timeout,
        })
    }

    /// Request body for a single-turn generation.
    pub fn build_generate_body(prompt: &ComposedPrompt, config: &GenerationConfig) -> Value {
        serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt.as_str() }],
            }],
            "generationConfig": config,
        })
    }

    pub fn generate_path(model: &str) -> String {
        format!("{API_VERSION_PATH}/models/{model}:generateContent")
    }

    pub fn catalog_path() -> String {
        format!("{API_VERSION_PATH}/models")
    }
}

impl fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("base_url", &self.transport.base_url())
            .field("catalog_timeout", &self.catalog_timeout)
            .field("generation_timeout", &self.generation_timeout)
            .finish()
    }
}

/// Bound a provider call; expiry becomes [`Error::Timeout`] for `stage`.
pub(crate) async fn with_deadline<T>(
    stage: Stage,
    after: Duration,
    call: impl Future<Output = Result<T>>,
) -> Result<T> {
    match tokio::time::timeout(after, call).await {
        Ok(result) => result,
        Err(_) => Err(Error::Timeout { stage, after }),
    }
}

#[async_trait]
impl ModelProvider for GeminiProvider {
    fn provider_id(&self) -> &str {
        "google"
    }

    async fn list_models(&self, credential: &Credential) -> Result<ModelCatalog> {
        let body = with_deadline(
            Stage::Catalog,
            self.catalog_timeout,
            self.transport.get_json(&Self::catalog_path(), credential),
        )
        .await?;
        let catalog: ModelCatalog = serde_json::from_value(body).map_err(|e| {
            Error::Transport(crate::transport::TransportError::Other(format!(
                "unexpected catalog shape: {}",
                e
            )))
        })?;
        debug!(
            models = catalog.models.as_ref().map(Vec::len).unwrap_or(0),
            "fetched model catalog"
        );
        Ok(catalog)
    }

    async fn generate(
        &self,
        credential: &Credential,
        model: &str,
        prompt: &ComposedPrompt,
        config: &GenerationConfig,
    ) -> Result<GenerateResponse> {
        let request = Self::build_generate_body(prompt, config);
        let body = with_deadline(
            Stage::Generation,
            self.generation_timeout,
            self.transport
                .post_json(&Self::generate_path(model), credential, &request),
        )
        .await?;
        serde_json::from_value(body).map_err(|e| {
            Error::Transport(crate::transport::TransportError::Other(format!(
                "unexpected generateContent shape: {}",
                e
            )))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::compose;
    use crate::types::CreativeBrief;

    #[test]
    fn test_build_generate_body() {
        let prompt = compose(&CreativeBrief::new("Hello"));
        let body = GeminiProvider::build_generate_body(&prompt, &GenerationConfig::default());
        assert_eq!(body["contents"].as_array().unwrap().len(), 1);
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], prompt.as_str());
        assert_eq!(body["generationConfig"]["temperature"], 0.75);
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 8192);
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
    }

    #[test]
    fn test_paths() {
        assert_eq!(GeminiProvider::catalog_path(), "/v1beta/models");
        assert_eq!(
            GeminiProvider::generate_path("gemini-2.0-flash"),
            "/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[tokio::test]
    async fn test_deadline_maps_to_timeout() {
        let slow = async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok::<_, Error>(())
        };
        let err = with_deadline(Stage::Generation, Duration::from_millis(10), slow)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Timeout {
                stage: Stage::Generation,
                ..
            }
        ));
    }
}
