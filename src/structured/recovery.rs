//! Recovery of a structured value from raw model text.

use crate::i18n::{Locale, MessageKey};
use crate::structured::lenient;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, warn};

/// Code-fence markers. A language tag counts as part of the fence only when a line
/// break follows it (the break is kept) or when it is `json`; text glued to backticks
/// elsewhere survives.
static FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)```(?:[a-z0-9_+.\-]+(\r?\n)|json)?").expect("valid regex")
});

/// Stage that produced a parsed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecoveryStage {
    Strict,
    Lenient,
    Diagnostic,
}

impl RecoveryStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecoveryStage::Strict => "strict",
            RecoveryStage::Lenient => "lenient",
            RecoveryStage::Diagnostic => "diagnostic",
        }
    }
}

/// Fallback result when no parser could make sense of the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub error: String,
    /// Best-effort cleaned text, for inspection or manual repair.
    pub raw_output: String,
}

/// Either the parsed value or a diagnostic object, never both.
///
/// Serializes untagged: the parsed value as-is, or `{"error": ..., "raw_output": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RecoveredResult {
    Parsed(Value),
    Diagnostic(Diagnostic),
}

impl RecoveredResult {
    pub fn is_parsed(&self) -> bool {
        matches!(self, RecoveredResult::Parsed(_))
    }

    pub fn parsed(&self) -> Option<&Value> {
        match self {
            RecoveredResult::Parsed(v) => Some(v),
            RecoveredResult::Diagnostic(_) => None,
        }
    }

    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            RecoveredResult::Parsed(_) => None,
            RecoveredResult::Diagnostic(d) => Some(d),
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            RecoveredResult::Parsed(v) => v,
            RecoveredResult::Diagnostic(d) => serde_json::json!({
                "error": d.error,
                "raw_output": d.raw_output,
            }),
        }
    }
}

/// Recovery pipeline: strip fences → trim → bracket slice → strict → lenient → diagnostic.
///
/// Never fails; the worst case is a [`Diagnostic`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputRecovery {
    locale: Locale,
}

impl OutputRecovery {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn recover(&self, raw: &str) -> RecoveredResult {
        self.recover_with_stage(raw).0
    }

    /// Like [`recover`](Self::recover), also reporting which stage succeeded.
    pub fn recover_with_stage(&self, raw: &str) -> (RecoveredResult, RecoveryStage) {
        let cleaned = clean(raw);
        debug!(raw_len = raw.len(), cleaned_len = cleaned.len(), "cleaned model output");

        match serde_json::from_str::<Value>(&cleaned) {
            Ok(value) => return (RecoveredResult::Parsed(value), RecoveryStage::Strict),
            Err(e) => warn!(error = %e, "strict JSON parse failed, attempting lenient parse"),
        }

        match lenient::parse(&cleaned) {
            Ok(value) => (RecoveredResult::Parsed(value), RecoveryStage::Lenient),
            Err(e) => {
                error!(error = %e, "all parsing failed, returning diagnostic");
                let diagnostic = Diagnostic {
                    error: self.locale.text(MessageKey::RecoveryFailed).to_string(),
                    raw_output: cleaned,
                };
                (
                    RecoveredResult::Diagnostic(diagnostic),
                    RecoveryStage::Diagnostic,
                )
            }
        }
    }
}

/// Recover with the default locale.
pub fn recover(raw: &str) -> RecoveredResult {
    OutputRecovery::default().recover(raw)
}

/// Cleaning stages only: strip fences, trim, bracket slice.
pub fn clean(raw: &str) -> String {
    let stripped = strip_fences(raw);
    bracket_slice(stripped.trim()).to_string()
}

/// Remove every code-fence marker.
pub fn strip_fences(text: &str) -> String {
    FENCE.replace_all(text, "${1}").into_owned()
}

/// Slice from the first `{` to the last `}` inclusive; unchanged when either is missing.
pub fn bracket_slice(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(first), Some(last)) if first < last => &text[first..=last],
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fenced_json_strict() {
        let (result, stage) =
            OutputRecovery::default().recover_with_stage("```json\n{\"a\":1}\n```");
        assert_eq!(result, RecoveredResult::Parsed(json!({"a": 1})));
        assert_eq!(stage, RecoveryStage::Strict);
    }

    #[test]
    fn test_uppercase_and_untagged_fences() {
        assert_eq!(strip_fences("```JSON\n{}\n```"), "\n{}\n");
        assert_eq!(strip_fences("```\n{}\n```"), "\n{}\n");
        assert_eq!(strip_fences("```javascript\n{}```"), "\n{}");
    }

    #[test]
    fn test_prose_and_trailing_comma_lenient() {
        let (result, stage) = OutputRecovery::default().recover_with_stage("Sure! {\"a\":1,}");
        assert_eq!(result, RecoveredResult::Parsed(json!({"a": 1})));
        assert_eq!(stage, RecoveryStage::Lenient);
    }

    #[test]
    fn test_no_braces_is_diagnostic() {
        let result = OutputRecovery::new(Locale::En).recover("  not json at all \n");
        let d = result.diagnostic().unwrap();
        assert_eq!(d.raw_output, "not json at all");
        assert_eq!(d.error, Locale::En.text(MessageKey::RecoveryFailed));
    }

    #[test]
    fn test_backticks_inside_string_values_keep_their_text() {
        assert_eq!(
            recover("{\"a\": \"see ```1.5-inch spec\"}"),
            RecoveredResult::Parsed(json!({"a": "see 1.5-inch spec"}))
        );
        assert_eq!(
            recover("{\"code\": \"```python print(1)```\"}"),
            RecoveredResult::Parsed(json!({"code": "python print(1)"}))
        );
        assert_eq!(strip_fences("```rust\r\n{}```"), "\r\n{}");
    }

    #[test]
    fn test_bracket_slice() {
        assert_eq!(bracket_slice("x {\"a\": {}} y"), "{\"a\": {}}");
        assert_eq!(bracket_slice("} backwards {"), "} backwards {");
        assert_eq!(bracket_slice("no braces"), "no braces");
    }

    #[test]
    fn test_diagnostic_serializes_flat() {
        let result = OutputRecovery::new(Locale::Id).recover("oops");
        let v = serde_json::to_value(&result).unwrap();
        assert_eq!(v["raw_output"], "oops");
        assert_eq!(
            v["error"],
            "Maaf, AI terlalu kreatif dan merusak format JSON. Silakan coba lagi."
        );
    }

    #[test]
    fn test_parsed_serializes_as_value() {
        let v = serde_json::to_value(recover("{\"prompt\":{\"type\":\"Surreal\"}}")).unwrap();
        assert_eq!(v, json!({"prompt": {"type": "Surreal"}}));
    }
}
