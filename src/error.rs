use crate::i18n::{Locale, MessageKey};
use crate::transport::TransportError;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Outbound call a timeout applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Model catalog lookup.
    Catalog,
    /// Content generation.
    Generation,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Catalog => "catalog",
            Stage::Generation => "generation",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unified error type for the director runtime.
///
/// Every stage up to and including inference propagates one of these unchanged.
/// Structured-output recovery never produces one: it degrades to a diagnostic value.
/// `Display` is English and meant for logs; user-facing text goes through [`Error::localized`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("no credential supplied by the caller and no fallback credential configured")]
    MissingCredential,

    #[error("provider rejected the credential: {message}")]
    Credential { message: String },

    #[error("credential accepted but the provider returned no model list")]
    Catalog,

    #[error("no model in the catalog supports generateContent")]
    NoEligibleModel,

    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("provider returned no candidates")]
    EmptyResponse,

    #[error("{stage} call timed out after {}s", .after.as_secs())]
    Timeout { stage: Stage, after: Duration },

    #[error("Network transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl Error {
    pub fn credential(msg: impl Into<String>) -> Self {
        Error::Credential {
            message: msg.into(),
        }
    }

    pub fn provider(msg: impl Into<String>) -> Self {
        Error::Provider {
            message: msg.into(),
        }
    }

    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Error::InvalidRequest {
            message: msg.into(),
        }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration {
            message: msg.into(),
        }
    }

    /// Stable machine-readable class, used as a structured log field.
    pub fn class(&self) -> &'static str {
        match self {
            Error::MissingCredential => "missing_credential",
            Error::Credential { .. } => "credential",
            Error::Catalog => "catalog",
            Error::NoEligibleModel => "no_eligible_model",
            Error::Provider { .. } => "provider",
            Error::EmptyResponse => "empty_response",
            Error::Timeout { .. } => "timeout",
            Error::Transport(_) => "transport",
            Error::InvalidRequest { .. } => "invalid_request",
            Error::Configuration { .. } => "configuration",
        }
    }

    /// User-facing message in the given locale.
    ///
    /// Provider messages are surfaced verbatim; only the surrounding hint is translated.
    pub fn localized(&self, locale: Locale) -> String {
        match self {
            Error::MissingCredential => locale.text(MessageKey::MissingCredential).to_string(),
            Error::Credential { message } => {
                format!("{}: {}", locale.text(MessageKey::CheckCredential), message)
            }
            Error::Catalog => locale.text(MessageKey::EmptyCatalog).to_string(),
            Error::NoEligibleModel => locale.text(MessageKey::NoEligibleModel).to_string(),
            Error::Provider { message } => message.clone(),
            Error::EmptyResponse => locale.text(MessageKey::EmptyResponse).to_string(),
            Error::Timeout { stage, after } => format!(
                "{} ({}, {}s)",
                locale.text(MessageKey::Timeout),
                stage,
                after.as_secs()
            ),
            Error::Transport(e) => format!("{}: {}", locale.text(MessageKey::Transport), e),
            Error::InvalidRequest { message } => {
                format!("{}: {}", locale.text(MessageKey::InvalidRequest), message)
            }
            Error::Configuration { message } => message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_error_keeps_provider_message() {
        let err = Error::credential("API key not valid. Please pass a valid API key.");
        let msg = err.localized(Locale::En);
        assert!(msg.starts_with("Model lookup failed (check your API key)"));
        assert!(msg.ends_with("API key not valid. Please pass a valid API key."));
    }

    #[test]
    fn test_provider_error_is_verbatim() {
        let err = Error::provider("Resource has been exhausted");
        assert_eq!(err.localized(Locale::Id), "Resource has been exhausted");
        assert_eq!(err.class(), "provider");
    }

    #[test]
    fn test_timeout_display() {
        let err = Error::Timeout {
            stage: Stage::Catalog,
            after: Duration::from_secs(9),
        };
        assert_eq!(err.to_string(), "catalog call timed out after 9s");
        assert!(err.localized(Locale::En).contains("catalog"));
    }
}
