pub mod claims;
pub mod errors;
pub mod key;
pub mod signer;

pub use claims::Claims;
pub use errors::TokenError;
pub use key::SigningKey;
pub use signer::TokenSigner;
pub use signer::DEFAULT_TTL_SECONDS;
