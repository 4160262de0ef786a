//! # prompt-director
//!
//! 创意简报 → 结构化广告图像提示词：模型发现、提示词组装、容错的 JSON 恢复。
//!
//! Turns a creative brief into a structured JSON specification of an advertising image by
//! prompting a generative model, and recovers well-formed JSON from whatever the model
//! actually returns.
//!
//! ## Pipeline
//!
//! 1. **Prompt composition** ([`prompt`]): fixed directive + mandatory schema + reference
//!    and override clauses + the caller's idea, deterministically.
//! 2. **Model resolution** ([`routing`]): query the provider catalog and pick a
//!    generation-capable model by tier policy (`flash` before `pro` by default).
//! 3. **Inference** ([`client::InferenceInvoker`]): one single-turn generation call at
//!    temperature 0.75, 8192 output tokens, JSON response type.
//! 4. **Recovery** ([`structured`]): strip fences, slice braces, strict parse, lenient
//!    parse, or a diagnostic object. Never fails.
//!
//! The [`server`] module exposes the pipeline over HTTP.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use prompt_director::{CreativeBrief, DirectorBuilder};
//!
//! #[tokio::main]
//! async fn main() -> prompt_director::Result<()> {
//!     let director = DirectorBuilder::new()
//!         .fallback_credential("your-api-key")
//!         .build()?;
//!
//!     let brief = CreativeBrief::new("Iced coffee launch, summer vibe")
//!         .with_style("Cinematic")
//!         .with_ratio("4:5");
//!
//!     let result = director.generate(&brief).await?;
//!     println!("{}", serde_json::to_string_pretty(&result).unwrap_or_default());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`prompt`] | Directive text and prompt composition |
//! | [`routing`] | Model selection policy and resolver |
//! | [`drivers`] | Provider abstraction and the Gemini provider |
//! | [`client`] | Inference invoker, director and builder |
//! | [`structured`] | Recovery pipeline and lenient JSON reader |
//! | [`cache`] | Optional credential-keyed model cache |
//! | [`server`] | axum HTTP boundary |
//! | [`config`] | Environment configuration |

pub mod cache;
pub mod client;
pub mod config;
pub mod drivers;
pub mod i18n;
pub mod prompt;
pub mod routing;
pub mod server;
pub mod structured;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use client::{Director, DirectorBuilder};
pub use config::DirectorConfig;
pub use i18n::Locale;
pub use prompt::{compose, ComposedPrompt};
pub use structured::{recover, RecoveredResult};
pub use types::{CreativeBrief, Credential, ModelDescriptor};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, Stage};
