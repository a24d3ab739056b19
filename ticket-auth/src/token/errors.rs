use thiserror::Error;

/// Why a token failed verification.
///
/// The three kinds are mutually exclusive. Callers outside this crate only
/// ever see them collapsed into a single unauthorized outcome.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token is malformed: {0}")]
    MalformedToken(String),

    #[error("Token signature does not match")]
    BadSignature,

    #[error("Token expired at {exp} (now {now})")]
    Expired { exp: i64, now: i64 },
}
