pub mod argon2;
pub mod errors;
pub mod hasher;
pub mod policy;
pub mod sha256;

pub use self::argon2::Argon2Hasher;
pub use errors::PasswordError;
pub use hasher::CredentialHasher;
pub use hasher::HashStrategy;
pub use hasher::PasswordHasher;
pub use policy::PasswordPolicy;
pub use sha256::Sha256Hasher;
