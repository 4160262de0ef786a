//! Provider 驱动抽象层 — 模型目录查询与单轮内容生成
//!
//! Provider abstraction. The remote model service is opaque to the rest of the crate:
//! it lists models and turns a prompt into candidate text, and may fail doing either.
//! [`GeminiProvider`] talks to the Google Generative Language API; tests substitute
//! their own [`ModelProvider`] implementations.

pub mod gemini;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::prompt::ComposedPrompt;
use crate::types::{Credential, ModelCatalog, ProviderErrorBody};
use crate::Result;

pub use gemini::GeminiProvider;

/// Fixed generation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub max_output_tokens: u32,
    /// Declared content type of the reply.
    pub response_mime_type: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.75,
            max_output_tokens: 8192,
            response_mime_type: "application/json".to_string(),
        }
    }
}

/// Generation response: candidates, an error, or (malformed) neither.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<Candidate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ProviderErrorBody>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<UsageMetadata>,
}

impl GenerateResponse {
    /// First candidate's first text part.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .as_ref()?
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }

    pub fn has_candidates(&self) -> bool {
        self.candidates.as_ref().is_some_and(|c| !c.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Token usage statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u64,
    #[serde(default)]
    pub candidates_token_count: u64,
    #[serde(default)]
    pub total_token_count: u64,
}

/// Remote model service.
///
/// Implementations return the provider's response objects as decoded; interpreting
/// embedded `error` fields and empty results is left to the resolver and invoker.
#[async_trait]
pub trait ModelProvider: Send + Sync + std::fmt::Debug {
    /// Provider identifier used in logs.
    fn provider_id(&self) -> &str;

    /// Fetch the model catalog.
    async fn list_models(&self, credential: &Credential) -> Result<ModelCatalog>;

    /// Single-turn generation with the prompt as the only user message.
    async fn generate(
        &self,
        credential: &Credential,
        model: &str,
        prompt: &ComposedPrompt,
        config: &GenerationConfig,
    ) -> Result<GenerateResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_config_wire_format() {
        let v = serde_json::to_value(GenerationConfig::default()).unwrap();
        assert_eq!(
            v,
            serde_json::json!({
                "temperature": 0.75,
                "maxOutputTokens": 8192,
                "responseMimeType": "application/json"
            })
        );
    }

    #[test]
    fn test_first_text() {
        let resp: GenerateResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": {"parts": [{"text": "{\"a\":1}"}, {"text": "ignored"}], "role": "model"},
                "finishReason": "STOP"
            }]
        }))
        .unwrap();
        assert!(resp.has_candidates());
        assert_eq!(resp.first_text(), Some("{\"a\":1}"));
    }

    #[test]
    fn test_empty_candidates() {
        let resp: GenerateResponse =
            serde_json::from_value(serde_json::json!({"candidates": []})).unwrap();
        assert!(!resp.has_candidates());
        assert_eq!(resp.first_text(), None);
    }
}
