use base64::alphabet;
use base64::engine::general_purpose::GeneralPurpose;
use base64::engine::general_purpose::GeneralPurposeConfig;
use base64::engine::DecodePaddingMode;
use base64::Engine;

use super::errors::CodecError;

/// URL-safe alphabet, no padding in either direction.
///
/// Padding is rejected on input and trailing bits must be zero, so every byte
/// sequence has exactly one accepted spelling.
const ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::RequireNone),
);

/// Encode bytes into URL-safe base64 without padding.
///
/// The output never contains `+`, `/` or `=`.
pub fn encode(bytes: impl AsRef<[u8]>) -> String {
    ENGINE.encode(bytes)
}

/// Decode unpadded URL-safe base64 text. The missing padding is implied by
/// the input length.
///
/// # Errors
/// * `MalformedEncoding` - Invalid character, padding, impossible length or
///   non-canonical trailing bits
pub fn decode(text: impl AsRef<[u8]>) -> Result<Vec<u8>, CodecError> {
    ENGINE
        .decode(text)
        .map_err(|e| CodecError::MalformedEncoding(e.to_string()))
}
