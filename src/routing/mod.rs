//! Model resolution: pick one generation-capable model from the provider catalog.
//!
//! Selection itself ([`select_model`]) is pure logic and does no I/O; the
//! [`ModelResolver`] wraps it with the catalog query, error mapping and the optional
//! credential-keyed cache.

use crate::cache::{CredentialFingerprint, ModelCache};
use crate::drivers::ModelProvider;
use crate::types::{Credential, ModelDescriptor};
use crate::{Error, Result};
use std::sync::Arc;
use tracing::{debug, info};

/// Ordered name-substring tiers. The first tier with an eligible match wins;
/// with no tier match any eligible model is taken. Catalog order breaks ties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionPolicy {
    tiers: Vec<String>,
}

impl SelectionPolicy {
    pub fn new<I, S>(tiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tiers: tiers
                .into_iter()
                .map(|t| t.into().trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    /// Parse a comma-separated tier list, e.g. `"flash,pro"`.
    pub fn parse(spec: &str) -> Self {
        Self::new(spec.split(','))
    }

    pub fn tiers(&self) -> &[String] {
        &self.tiers
    }
}

impl Default for SelectionPolicy {
    /// Fast tier first, then the pro tier.
    fn default() -> Self {
        Self::new(["flash", "pro"])
    }
}

/// Choose a model per `policy` among generation-capable descriptors.
pub fn select_model<'a>(
    models: &'a [ModelDescriptor],
    policy: &SelectionPolicy,
) -> Option<&'a ModelDescriptor> {
    let eligible: Vec<&ModelDescriptor> =
        models.iter().filter(|m| m.is_generation_capable()).collect();

    policy
        .tiers()
        .iter()
        .find_map(|tier| {
            eligible
                .iter()
                .find(|m| m.name.to_lowercase().contains(tier.as_str()))
                .copied()
        })
        .or_else(|| eligible.first().copied())
}

#[derive(Debug)]
pub struct ModelResolver {
    provider: Arc<dyn ModelProvider>,
    policy: SelectionPolicy,
    cache: Option<ModelCache>,
}

impl ModelResolver {
    pub fn new(provider: Arc<dyn ModelProvider>, policy: SelectionPolicy) -> Self {
        Self {
            provider,
            policy,
            cache: None,
        }
    }

    pub fn with_cache(mut self, cache: ModelCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn policy(&self) -> &SelectionPolicy {
        &self.policy
    }

    /// Identifier (without the `models/` prefix) of the model to generate with.
    pub async fn resolve(&self, credential: &Credential) -> Result<String> {
        if let Some(cache) = &self.cache {
            if let Some(model) = cache.get(credential) {
                debug!(
                    model = %model,
                    credential = %CredentialFingerprint::of(credential),
                    "model cache hit"
                );
                return Ok(model);
            }
        }

        let catalog = self.provider.list_models(credential).await?;
        if let Some(err) = catalog.error {
            return Err(Error::credential(err.message));
        }
        let models = catalog.models.ok_or(Error::Catalog)?;
        let selected = select_model(&models, &self.policy).ok_or(Error::NoEligibleModel)?;
        let model = selected.id().to_string();

        info!(
            provider = self.provider.provider_id(),
            model = %model,
            catalog_size = models.len(),
            "selected model"
        );

        if let Some(cache) = &self.cache {
            cache.put(credential, model.clone());
        }
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<ModelDescriptor> {
        vec![
            ModelDescriptor::new("models/text-embedding-004", ["embedContent"]),
            ModelDescriptor::new("models/gemini-1.5-pro", ["generateContent", "countTokens"]),
            ModelDescriptor::new("models/gemini-2.0-flash", ["generateContent"]),
            ModelDescriptor::new("models/gemini-2.0-flash-lite", ["generateContent"]),
        ]
    }

    #[test]
    fn test_flash_preferred_over_pro() {
        let models = vec![
            ModelDescriptor::new("models/x-flash", ["generateContent"]),
            ModelDescriptor::new("models/x-pro", ["generateContent"]),
        ];
        let picked = select_model(&models, &SelectionPolicy::default()).unwrap();
        assert_eq!(picked.id(), "x-flash");
    }

    #[test]
    fn test_catalog_order_breaks_ties() {
        let models = catalog();
        let picked = select_model(&models, &SelectionPolicy::default()).unwrap();
        assert_eq!(picked.id(), "gemini-2.0-flash");
    }

    #[test]
    fn test_pro_when_no_flash() {
        let models = vec![
            ModelDescriptor::new("models/gemini-1.0-ultra", ["generateContent"]),
            ModelDescriptor::new("models/gemini-1.5-pro", ["generateContent"]),
        ];
        let picked = select_model(&models, &SelectionPolicy::default()).unwrap();
        assert_eq!(picked.id(), "gemini-1.5-pro");
    }

    #[test]
    fn test_any_eligible_as_last_resort() {
        let models = vec![
            ModelDescriptor::new("models/gemini-flash-embed", ["embedContent"]),
            ModelDescriptor::new("models/gemma-3", ["generateContent"]),
        ];
        let picked = select_model(&models, &SelectionPolicy::default()).unwrap();
        assert_eq!(picked.id(), "gemma-3");
    }

    #[test]
    fn test_no_eligible_model() {
        let models = vec![ModelDescriptor::new("models/x-flash", ["embedContent"])];
        assert!(select_model(&models, &SelectionPolicy::default()).is_none());
        assert!(select_model(&[], &SelectionPolicy::default()).is_none());
    }

    #[test]
    fn test_custom_policy() {
        let models = catalog();
        let policy = SelectionPolicy::parse(" PRO , flash,");
        assert_eq!(policy.tiers(), ["pro", "flash"]);
        assert_eq!(
            select_model(&models, &policy).unwrap().id(),
            "gemini-1.5-pro"
        );
    }
}
