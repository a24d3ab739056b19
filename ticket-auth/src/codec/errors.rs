use thiserror::Error;

/// Error type for segment decoding.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("Malformed encoding: {0}")]
    MalformedEncoding(String),
}
