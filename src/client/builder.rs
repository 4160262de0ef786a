use crate::cache::{ModelCache, DEFAULT_MAX_ENTRIES};
use crate::client::core::Director;
use crate::client::invoker::InferenceInvoker;
use crate::config::DirectorConfig;
use crate::drivers::{GeminiProvider, ModelProvider};
use crate::i18n::Locale;
use crate::routing::{ModelResolver, SelectionPolicy};
use crate::structured::OutputRecovery;
use crate::types::Credential;
use crate::Result;
use std::sync::Arc;
use std::time::Duration;

/// Builder for creating a [`Director`] with custom configuration.
///
/// Keep this surface area small and predictable (developer-friendly).
pub struct DirectorBuilder {
    config: DirectorConfig,
    provider: Option<Arc<dyn ModelProvider>>,
}

impl DirectorBuilder {
    pub fn new() -> Self {
        Self {
            config: DirectorConfig::default(),
            provider: None,
        }
    }

    /// Start from an already-loaded configuration.
    pub fn from_config(config: DirectorConfig) -> Self {
        Self {
            config,
            provider: None,
        }
    }

    /// Fallback credential used when a brief carries none. Blank keys are ignored.
    pub fn fallback_credential(mut self, key: impl Into<String>) -> Self {
        self.config.fallback_credential = Credential::new(key);
        self
    }

    /// Override the provider base URL (primarily for testing with mock servers).
    pub fn base_url_override(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    pub fn catalog_timeout(mut self, timeout: Duration) -> Self {
        self.config.catalog_timeout = timeout;
        self
    }

    pub fn generation_timeout(mut self, timeout: Duration) -> Self {
        self.config.generation_timeout = timeout;
        self
    }

    pub fn selection_policy(mut self, policy: SelectionPolicy) -> Self {
        self.config.selection_policy = policy;
        self
    }

    /// Cache resolved models per credential for `ttl`. Zero disables caching.
    pub fn model_cache_ttl(mut self, ttl: Duration) -> Self {
        self.config.model_cache_ttl = ttl;
        self
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.config.locale = locale;
        self
    }

    /// Inject a provider instead of the default Gemini HTTP provider.
    pub fn provider(mut self, provider: Arc<dyn ModelProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn build(self) -> Result<Director> {
        let config = self.config;
        let provider: Arc<dyn ModelProvider> = match self.provider {
            Some(p) => p,
            None => Arc::new(GeminiProvider::new(
                &config.base_url,
                config.catalog_timeout,
                config.generation_timeout,
            )?),
        };

        let mut resolver = ModelResolver::new(provider.clone(), config.selection_policy);
        if !config.model_cache_ttl.is_zero() {
            resolver = resolver.with_cache(ModelCache::new(
                config.model_cache_ttl,
                DEFAULT_MAX_ENTRIES,
            ));
        }

        Ok(Director {
            invoker: InferenceInvoker::new(provider, resolver),
            recovery: OutputRecovery::new(config.locale),
            fallback_credential: config.fallback_credential,
            locale: config.locale,
        })
    }
}

impl Default for DirectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
