//! Runtime configuration, read once at startup.
//!
//! Environment variables:
//! - `GEMINI_API_KEY` fallback credential when the caller sends none
//! - `PROMPT_DIRECTOR_BASE_URL` provider base URL
//! - `PROMPT_DIRECTOR_BIND` listen address (default `0.0.0.0:8888`)
//! - `PROMPT_DIRECTOR_CATALOG_TIMEOUT_SECS` (default 9)
//! - `PROMPT_DIRECTOR_GENERATION_TIMEOUT_SECS` (default 60)
//! - `PROMPT_DIRECTOR_MODEL_TIERS` comma-separated selection tiers (default `flash,pro`)
//! - `PROMPT_DIRECTOR_MODEL_CACHE_SECS` model cache TTL, 0 disables (default 0)
//! - `PROMPT_DIRECTOR_LOCALE` `id` or `en` (default `id`)

use crate::drivers::gemini::DEFAULT_BASE_URL;
use crate::i18n::Locale;
use crate::routing::SelectionPolicy;
use crate::types::Credential;
use crate::{Error, Result};
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_BIND: &str = "0.0.0.0:8888";
pub const DEFAULT_CATALOG_TIMEOUT: Duration = Duration::from_secs(9);
pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct DirectorConfig {
    /// Process-wide credential used when the caller supplies none. Read-only after startup.
    pub fallback_credential: Option<Credential>,
    pub base_url: String,
    pub bind_addr: SocketAddr,
    pub catalog_timeout: Duration,
    pub generation_timeout: Duration,
    pub selection_policy: SelectionPolicy,
    /// Zero disables the model cache.
    pub model_cache_ttl: Duration,
    pub locale: Locale,
}

impl Default for DirectorConfig {
    fn default() -> Self {
        Self {
            fallback_credential: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8888)),
            catalog_timeout: DEFAULT_CATALOG_TIMEOUT,
            generation_timeout: DEFAULT_GENERATION_TIMEOUT,
            selection_policy: SelectionPolicy::default(),
            model_cache_ttl: Duration::ZERO,
            locale: Locale::default(),
        }
    }
}

impl DirectorConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source; unset or blank values keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut cfg = Self::default();

        cfg.fallback_credential = get("GEMINI_API_KEY").and_then(Credential::new);

        if let Some(base) = get("PROMPT_DIRECTOR_BASE_URL") {
            url::Url::parse(base.trim()).map_err(|e| {
                Error::configuration(format!("PROMPT_DIRECTOR_BASE_URL is not a URL: {}", e))
            })?;
            cfg.base_url = base.trim().to_string();
        }

        if let Some(bind) = get("PROMPT_DIRECTOR_BIND") {
            cfg.bind_addr = bind.trim().parse().map_err(|e| {
                Error::configuration(format!("PROMPT_DIRECTOR_BIND is not host:port: {}", e))
            })?;
        }

        if let Some(secs) = get("PROMPT_DIRECTOR_CATALOG_TIMEOUT_SECS") {
            cfg.catalog_timeout = parse_secs("PROMPT_DIRECTOR_CATALOG_TIMEOUT_SECS", &secs)?;
        }
        if let Some(secs) = get("PROMPT_DIRECTOR_GENERATION_TIMEOUT_SECS") {
            cfg.generation_timeout =
                parse_secs("PROMPT_DIRECTOR_GENERATION_TIMEOUT_SECS", &secs)?;
        }

        if let Some(tiers) = get("PROMPT_DIRECTOR_MODEL_TIERS") {
            cfg.selection_policy = SelectionPolicy::parse(&tiers);
        }

        if let Some(secs) = get("PROMPT_DIRECTOR_MODEL_CACHE_SECS") {
            cfg.model_cache_ttl = secs.trim().parse::<u64>().map(Duration::from_secs).map_err(
                |_| Error::configuration("PROMPT_DIRECTOR_MODEL_CACHE_SECS must be an integer"),
            )?;
        }

        if let Some(locale) = get("PROMPT_DIRECTOR_LOCALE") {
            cfg.locale = locale.parse().map_err(Error::configuration)?;
        }

        Ok(cfg)
    }
}

/// Positive whole seconds.
fn parse_secs(key: &str, value: &str) -> Result<Duration> {
    match value.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(Duration::from_secs(n)),
        _ => Err(Error::configuration(format!(
            "{} must be a positive number of seconds",
            key
        ))),
    }
}
