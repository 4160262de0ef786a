//! 模型缓存模块：按凭证缓存已解析的模型 ID，避免每次请求都查询模型目录。
//!
//! # Model Cache
//!
//! Optional short-lived cache of the resolved model identifier, keyed by a
//! fingerprint of the credential. Off unless a TTL is configured, in which case each
//! request within the TTL skips the catalog round trip.
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`ModelCache`] | Bounded LRU with per-entry TTL |
//! | [`CredentialFingerprint`] | SHA-256 of the credential; the raw key is never stored |
//!
//! ## Example
//!
//! ```rust
//! use prompt_director::cache::ModelCache;
//! use prompt_director::types::Credential;
//! use std::time::Duration;
//!
//! let cache = ModelCache::new(Duration::from_secs(300), 64);
//! let key = Credential::new("k").unwrap();
//! cache.put(&key, "gemini-2.0-flash");
//! assert_eq!(cache.get(&key).as_deref(), Some("gemini-2.0-flash"));
//! ```

mod key;
mod model_cache;

pub use key::CredentialFingerprint;
pub use model_cache::{ModelCache, DEFAULT_MAX_ENTRIES};
