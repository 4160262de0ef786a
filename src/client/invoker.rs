//! Inference: resolve a model, send the prompt, return the raw reply text.

use crate::drivers::{GenerationConfig, ModelProvider};
use crate::prompt::ComposedPrompt;
use crate::routing::ModelResolver;
use crate::types::Credential;
use crate::{Error, Result};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug)]
pub struct InferenceInvoker {
    resolver: ModelResolver,
    provider: Arc<dyn ModelProvider>,
    generation: GenerationConfig,
}

impl InferenceInvoker {
    pub fn new(provider: Arc<dyn ModelProvider>, resolver: ModelResolver) -> Self {
        Self {
            resolver,
            provider,
            generation: GenerationConfig::default(),
        }
    }

    pub fn generation_config(&self) -> &GenerationConfig {
        &self.generation
    }

    pub fn resolver(&self) -> &ModelResolver {
        &self.resolver
    }

    /// One catalog lookup (unless cached) then exactly one generation call. No retries.
    pub async fn invoke(&self, prompt: &ComposedPrompt, credential: &Credential) -> Result<String> {
        let model = self.resolver.resolve(credential).await?;
        debug!(model = %model, prompt_len = prompt.as_str().len(), "submitting prompt");

        let response = self
            .provider
            .generate(credential, &model, prompt, &self.generation)
            .await?;

        if let Some(err) = &response.error {
            return Err(Error::provider(err.message.as_str()));
        }
        if !response.has_candidates() {
            return Err(Error::EmptyResponse);
        }
        let text = response.first_text().ok_or(Error::EmptyResponse)?;

        if let Some(usage) = &response.usage_metadata {
            info!(
                model = %model,
                prompt_tokens = usage.prompt_token_count,
                completion_tokens = usage.candidates_token_count,
                "generation complete"
            );
        }
        Ok(text.to_string())
    }
}
