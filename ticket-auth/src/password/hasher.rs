use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use super::argon2::Argon2Hasher;
use super::errors::PasswordError;
use super::sha256::Sha256Hasher;

/// Derive a storable credential from a password and check candidates against it.
///
/// Implementations never expose an inverse. `verify` never fails: a stored
/// hash it cannot parse is a non-match.
pub trait CredentialHasher: Send + Sync {
    /// Derive the stored representation of `password`.
    ///
    /// # Errors
    /// * `HashingFailed` - The underlying derivation failed
    fn hash(&self, password: &str) -> Result<String, PasswordError>;

    /// True iff `password` matches `stored_hash`.
    fn verify(&self, password: &str, stored_hash: &str) -> bool;

    /// Whether `stored_hash` should be replaced by a fresh `hash` once the
    /// plaintext is known. Single-strategy hashers never ask for it.
    fn needs_rehash(&self, _stored_hash: &str) -> bool {
        false
    }
}

/// Hashing algorithm used for new credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashStrategy {
    #[default]
    Argon2,
    LegacySha256,
}

impl HashStrategy {
    /// Detect which strategy produced `stored_hash`.
    pub fn detect(stored_hash: &str) -> Option<Self> {
        if Argon2Hasher::recognizes(stored_hash) {
            Some(Self::Argon2)
        } else if Sha256Hasher::recognizes(stored_hash) {
            Some(Self::LegacySha256)
        } else {
            None
        }
    }

    /// Build the hasher for this strategy alone.
    pub fn hasher(self) -> Arc<dyn CredentialHasher> {
        match self {
            Self::Argon2 => Arc::new(Argon2Hasher::new()),
            Self::LegacySha256 => Arc::new(Sha256Hasher::new()),
        }
    }
}

/// Hashes with the configured strategy and verifies with whichever strategy
/// produced the stored hash.
///
/// Keeps legacy SHA-256 records verifiable after switching new credentials
/// to Argon2.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher {
    strategy: HashStrategy,
}

impl PasswordHasher {
    pub fn new(strategy: HashStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> HashStrategy {
        self.strategy
    }
}

impl CredentialHasher for PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordError> {
        match self.strategy {
            HashStrategy::Argon2 => Argon2Hasher::new().hash(password),
            HashStrategy::LegacySha256 => Sha256Hasher::new().hash(password),
        }
    }

    fn verify(&self, password: &str, stored_hash: &str) -> bool {
        match HashStrategy::detect(stored_hash) {
            Some(HashStrategy::Argon2) => Argon2Hasher::new().verify(password, stored_hash),
            Some(HashStrategy::LegacySha256) => Sha256Hasher::new().verify(password, stored_hash),
            None => {
                tracing::warn!("Stored credential hash has an unrecognized format");
                false
            }
        }
    }

    /// True when `stored_hash` was produced by a different strategy than the
    /// configured one.
    fn needs_rehash(&self, stored_hash: &str) -> bool {
        HashStrategy::detect(stored_hash) != Some(self.strategy)
    }
}
