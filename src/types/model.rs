//! Provider model catalog types.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Provider-specific prefix on catalog model names.
pub const MODEL_NAME_PREFIX: &str = "models/";

/// Generation method a model declares in the catalog.
///
/// The provider reports these as camelCase strings; unknown tags are preserved
/// so new provider capabilities never break catalog decoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GenerationMethod {
    GenerateContent,
    CountTokens,
    EmbedContent,
    BatchGenerateContent,
    CreateCachedContent,
    Other(String),
}

impl GenerationMethod {
    pub fn as_str(&self) -> &str {
        match self {
            Self::GenerateContent => "generateContent",
            Self::CountTokens => "countTokens",
            Self::EmbedContent => "embedContent",
            Self::BatchGenerateContent => "batchGenerateContent",
            Self::CreateCachedContent => "createCachedContent",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for GenerationMethod {
    fn from(s: String) -> Self {
        match s.as_str() {
            "generateContent" => Self::GenerateContent,
            "countTokens" => Self::CountTokens,
            "embedContent" => Self::EmbedContent,
            "batchGenerateContent" => Self::BatchGenerateContent,
            "createCachedContent" => Self::CreateCachedContent,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for GenerationMethod {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<GenerationMethod> for String {
    fn from(m: GenerationMethod) -> Self {
        m.as_str().to_string()
    }
}

impl fmt::Display for GenerationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the provider's model catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDescriptor {
    /// Provider name, e.g. `models/gemini-2.0-flash`.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub supported_generation_methods: HashSet<GenerationMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_token_limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_token_limit: Option<u64>,
}

impl ModelDescriptor {
    pub fn new<I, M>(name: impl Into<String>, methods: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<GenerationMethod>,
    {
        Self {
            name: name.into(),
            display_name: None,
            supported_generation_methods: methods.into_iter().map(Into::into).collect(),
            input_token_limit: None,
            output_token_limit: None,
        }
    }

    pub fn supports(&self, method: &GenerationMethod) -> bool {
        self.supported_generation_methods.contains(method)
    }

    pub fn is_generation_capable(&self) -> bool {
        self.supports(&GenerationMethod::GenerateContent)
    }

    /// Identifier usable in a generation URL (`models/` prefix stripped).
    pub fn id(&self) -> &str {
        self.name
            .strip_prefix(MODEL_NAME_PREFIX)
            .unwrap_or(&self.name)
    }
}

/// Error object the provider embeds in a response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Catalog response: a model list, an error, or (malformed) neither.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelCatalog {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub models: Option<Vec<ModelDescriptor>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ProviderErrorBody>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}
