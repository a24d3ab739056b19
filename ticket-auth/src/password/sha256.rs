use super::errors::PasswordError;
use super::hasher::CredentialHasher;
use crate::crypto::constant_time_eq;
use crate::crypto::sha256_hex;

/// Unsalted hex SHA-256 digest.
///
/// Matches hashes stored by the first version of the ticketing backend. It has
/// no salt and no cost factor, so it is only kept to verify existing records
/// and for deployments that explicitly opt into it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl Sha256Hasher {
    const DIGEST_HEX_LENGTH: usize = 64;

    pub fn new() -> Self {
        Self
    }

    /// Whether `stored_hash` looks like a lowercase hex SHA-256 digest.
    pub fn recognizes(stored_hash: &str) -> bool {
        stored_hash.len() == Self::DIGEST_HEX_LENGTH
            && stored_hash
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    }
}

impl CredentialHasher for Sha256Hasher {
    fn hash(&self, password: &str) -> Result<String, PasswordError> {
        Ok(sha256_hex(password.as_bytes()))
    }

    fn verify(&self, password: &str, stored_hash: &str) -> bool {
        if !Self::recognizes(stored_hash) {
            tracing::warn!(
                length = stored_hash.len(),
                "Stored SHA-256 hash is malformed"
            );
            return false;
        }

        let candidate = sha256_hex(password.as_bytes());
        constant_time_eq(candidate.as_bytes(), stored_hash.as_bytes())
    }
}
