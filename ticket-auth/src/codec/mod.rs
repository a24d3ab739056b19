pub mod base64url;
pub mod errors;

pub use base64url::decode;
pub use base64url::encode;
pub use errors::CodecError;
