//! Cache key generation.

use crate::types::Credential;
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CredentialFingerprint(String);

impl CredentialFingerprint {
    pub fn of(credential: &Credential) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"prompt-director:model:");
        hasher.update(credential.expose().as_bytes());
        let hash: String = hasher.finalize().iter().map(|b| format!("{:02x}", b)).collect();
        Self(hash)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CredentialFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Short prefix is enough to correlate log lines.
        write!(f, "{}", &self.0[..12])
    }
}
