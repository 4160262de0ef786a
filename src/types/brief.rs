//! Creative brief and credential types.

use crate::{Error, Result};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Caller-supplied creative brief.
///
/// Every field is untrusted text. An absent field, an empty string and a
/// whitespace-only string all mean "no override".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreativeBrief {
    /// Free-text idea, interpolated verbatim at the end of the prompt.
    pub prompt: String,
    #[serde(
        default,
        deserialize_with = "scalar_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub reference: Option<String>,
    #[serde(
        default,
        deserialize_with = "scalar_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub style: Option<String>,
    #[serde(
        default,
        deserialize_with = "scalar_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub font: Option<String>,
    #[serde(
        default,
        deserialize_with = "scalar_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub lighting: Option<String>,
    #[serde(
        default,
        deserialize_with = "scalar_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub ratio: Option<String>,
    #[serde(
        default,
        deserialize_with = "scalar_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub language: Option<String>,
    /// Caller's own provider key. Takes precedence over the configured fallback.
    #[serde(
        default,
        rename = "userApiKey",
        deserialize_with = "scalar_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub user_api_key: Option<String>,
}

impl CreativeBrief {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    pub fn with_lighting(mut self, lighting: impl Into<String>) -> Self {
        self.lighting = Some(lighting.into());
        self
    }

    pub fn with_ratio(mut self, ratio: impl Into<String>) -> Self {
        self.ratio = Some(ratio.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_user_api_key(mut self, key: impl Into<String>) -> Self {
        self.user_api_key = Some(key.into());
        self
    }

    pub fn reference(&self) -> Option<&str> {
        present(&self.reference)
    }

    pub fn style(&self) -> Option<&str> {
        present(&self.style)
    }

    pub fn font(&self) -> Option<&str> {
        present(&self.font)
    }

    pub fn lighting(&self) -> Option<&str> {
        present(&self.lighting)
    }

    pub fn ratio(&self) -> Option<&str> {
        present(&self.ratio)
    }

    pub fn language(&self) -> Option<&str> {
        present(&self.language)
    }

    /// True when at least one style/font/lighting/ratio/language override is set.
    pub fn has_overrides(&self) -> bool {
        self.style().is_some()
            || self.font().is_some()
            || self.lighting().is_some()
            || self.ratio().is_some()
            || self.language().is_some()
    }
}

/// Returns the original (untrimmed) value when it carries any non-whitespace text.
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

/// Optional brief field: strings as sent, other scalars as their text.
///
/// `null`, `false` and `0` read as absent. Arrays and objects are rejected.
fn scalar_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null | Value::Bool(false) => Ok(None),
        Value::Bool(true) => Ok(Some("true".to_string())),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) if n.as_f64() == Some(0.0) => Ok(None),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(de::Error::invalid_type(
            de::Unexpected::Other(if other.is_array() { "array" } else { "object" }),
            &"a string or scalar",
        )),
    }
}

/// Provider API key.
///
/// `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Returns `None` for empty or whitespace-only input.
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into();
        let trimmed = key.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Caller value wins when non-empty after trimming, otherwise the configured fallback.
    pub fn resolve(caller: Option<&str>, fallback: Option<&Credential>) -> Result<Self> {
        caller
            .and_then(Credential::new)
            .or_else(|| fallback.cloned())
            .ok_or(Error::MissingCredential)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brief_wire_names() {
        let brief: CreativeBrief = serde_json::from_value(serde_json::json!({
            "prompt": "Iced coffee ad",
            "style": "Cinematic",
            "language": null,
            "userApiKey": "k-123"
        }))
        .unwrap();
        assert_eq!(brief.prompt, "Iced coffee ad");
        assert_eq!(brief.style(), Some("Cinematic"));
        assert_eq!(brief.language(), None);
        assert_eq!(brief.user_api_key.as_deref(), Some("k-123"));
    }

    #[test]
    fn test_scalar_overrides_are_read_as_text() {
        let brief: CreativeBrief = serde_json::from_value(serde_json::json!({
            "prompt": "Poster",
            "style": 5,
            "ratio": 1.5,
            "font": true,
            "lighting": false,
            "language": 0
        }))
        .unwrap();
        assert_eq!(brief.style(), Some("5"));
        assert_eq!(brief.ratio(), Some("1.5"));
        assert_eq!(brief.font(), Some("true"));
        assert_eq!(brief.lighting(), None);
        assert_eq!(brief.language(), None);
    }

    #[test]
    fn test_structured_override_rejected() {
        let parsed = serde_json::from_value::<CreativeBrief>(serde_json::json!({
            "prompt": "Poster",
            "style": {"name": "Cinematic"}
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_brief_requires_prompt() {
        let parsed = serde_json::from_value::<CreativeBrief>(serde_json::json!({"style": "x"}));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_blank_fields_are_absent() {
        let brief = CreativeBrief::new("idea").with_font("").with_ratio("   ");
        assert_eq!(brief.font(), None);
        assert_eq!(brief.ratio(), None);
        assert!(!brief.has_overrides());
    }

    #[test]
    fn test_caller_credential_wins() {
        let fallback = Credential::new("env-key");
        let cred = Credential::resolve(Some("  caller-key "), fallback.as_ref()).unwrap();
        assert_eq!(cred.expose(), "caller-key");
    }

    #[test]
    fn test_blank_caller_credential_uses_fallback() {
        let fallback = Credential::new("env-key");
        let cred = Credential::resolve(Some("   "), fallback.as_ref()).unwrap();
        assert_eq!(cred.expose(), "env-key");
    }

    #[test]
    fn test_missing_credential() {
        let err = Credential::resolve(None, None).unwrap_err();
        assert!(matches!(err, Error::MissingCredential));
        assert!(Credential::new("").is_none());
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let cred = Credential::new("super-secret").unwrap();
        assert_eq!(format!("{:?}", cred), "Credential(***)");
    }
}
