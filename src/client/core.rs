use crate::client::invoker::InferenceInvoker;
use crate::i18n::Locale;
use crate::prompt;
use crate::structured::{OutputRecovery, RecoveredResult};
use crate::types::{CreativeBrief, Credential};
use crate::Result;
use std::time::Instant;
use tracing::{info, info_span, Instrument};

/// Per-request orchestrator.
///
/// Holds only read-only state, so one instance behind an `Arc` serves every request.
#[derive(Debug)]
pub struct Director {
    pub(crate) invoker: InferenceInvoker,
    pub(crate) recovery: OutputRecovery,
    pub(crate) fallback_credential: Option<Credential>,
    pub(crate) locale: Locale,
}

impl Director {
    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn invoker(&self) -> &InferenceInvoker {
        &self.invoker
    }

    /// Turn a brief into a structured ad-image prompt.
    ///
    /// Fails with [`crate::Error::MissingCredential`] before any network call when neither
    /// the brief nor the configuration carries a credential. Parse trouble never fails:
    /// it comes back as [`RecoveredResult::Diagnostic`].
    pub async fn generate(&self, brief: &CreativeBrief) -> Result<RecoveredResult> {
        let credential = Credential::resolve(
            brief.user_api_key.as_deref(),
            self.fallback_credential.as_ref(),
        )?;
        let caller_key = brief
            .user_api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty());

        let span = info_span!(
            "generate",
            caller_key,
            has_reference = brief.reference().is_some(),
            has_overrides = brief.has_overrides(),
        );

        async move {
            let started = Instant::now();
            let composed = prompt::compose(brief);
            let raw = self.invoker.invoke(&composed, &credential).await?;
            let (result, stage) = self.recovery.recover_with_stage(&raw);
            info!(
                stage = stage.as_str(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "brief processed"
            );
            Ok(result)
        }
        .instrument(span)
        .await
    }
}
