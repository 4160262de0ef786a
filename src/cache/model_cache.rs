//! Credential-keyed cache of resolved model identifiers.

use super::key::CredentialFingerprint;
use crate::types::Credential;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::{Duration, Instant};

pub const DEFAULT_MAX_ENTRIES: usize = 256;

struct CacheEntry {
    model: String,
    created_at: Instant,
}

pub struct ModelCache {
    entries: Mutex<LruCache<CredentialFingerprint, CacheEntry>>,
    ttl: Duration,
}

impl ModelCache {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        let cap = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(cap)),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cached model for this credential, if present and younger than the TTL.
    pub fn get(&self, credential: &Credential) -> Option<String> {
        let key = CredentialFingerprint::of(credential);
        let mut entries = self.entries.lock().ok()?;
        let expired = match entries.get(&key) {
            Some(entry) if entry.created_at.elapsed() <= self.ttl => {
                return Some(entry.model.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.pop(&key);
        }
        None
    }

    pub fn put(&self, credential: &Credential, model: impl Into<String>) {
        let key = CredentialFingerprint::of(credential);
        if let Ok(mut entries) = self.entries.lock() {
            entries.put(
                key,
                CacheEntry {
                    model: model.into(),
                    created_at: Instant::now(),
                },
            );
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for ModelCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelCache")
            .field("ttl", &self.ttl)
            .field("len", &self.len())
            .finish()
    }
}
