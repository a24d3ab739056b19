use std::fmt;
use std::sync::Arc;

/// Shared secret used to sign and verify tokens.
///
/// Loaded once at startup and never mutated. Cloning shares the same bytes.
#[derive(Clone)]
pub struct SigningKey {
    bytes: Arc<[u8]>,
}

impl SigningKey {
    /// Secrets shorter than 256 bits are accepted but reported as weak.
    pub const RECOMMENDED_MIN_LENGTH: usize = 32;

    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            bytes: Arc::from(secret.as_ref()),
        }
    }

    pub fn is_weak(&self) -> bool {
        self.bytes.len() < Self::RECOMMENDED_MIN_LENGTH
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("length", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

impl From<&str> for SigningKey {
    fn from(secret: &str) -> Self {
        Self::new(secret)
    }
}

impl From<String> for SigningKey {
    fn from(secret: String) -> Self {
        Self::new(secret)
    }
}

impl From<&[u8]> for SigningKey {
    fn from(secret: &[u8]) -> Self {
        Self::new(secret)
    }
}
