//! Stateless credential and token library for the ticketing backend
//!
//! Provides:
//! - URL-safe unpadded base64 codec
//! - Password hashing behind a pluggable strategy (Argon2id, legacy SHA-256)
//! - HS256 token issuance and verification with expiry
//! - Bearer token resolution against a user store port
//! - Registration and login flows
//!
//! No session state is kept: a token is checked with the signing key alone,
//! then its subject is looked up through [`UserLookup`].
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use ticket_auth::{CredentialHasher, PasswordHasher};
//!
//! let hasher = PasswordHasher::default();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("other_password", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use ticket_auth::{Claims, TokenError, TokenSigner};
//!
//! let signer = TokenSigner::new("secret_key_at_least_32_bytes_long!");
//! let token = signer.issue(Claims::new().with_subject(42), 3600);
//!
//! let claims = signer.verify(&token).unwrap();
//! assert_eq!(claims.subject_id(), Some(42));
//!
//! let other = TokenSigner::new("another_secret_at_least_32_bytes!!");
//! assert_eq!(other.verify(&token), Err(TokenError::BadSignature));
//! ```

pub mod authenticator;
pub mod codec;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod password;
pub mod resolver;
pub mod token;
pub mod user;

// Re-export commonly used items
pub use authenticator::AccessToken;
pub use authenticator::Authenticator;
pub use authenticator::RegisterCommand;
pub use codec::CodecError;
pub use crate::config::AuthConfig;
pub use errors::AuthError;
pub use errors::Rejection;
pub use password::CredentialHasher;
pub use password::HashStrategy;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::PasswordPolicy;
pub use resolver::bearer_token;
pub use resolver::Resolver;
pub use token::Claims;
pub use token::SigningKey;
pub use token::TokenError;
pub use token::TokenSigner;
pub use user::Principal;
pub use user::User;
pub use user::UserId;
pub use user::UserLookup;
pub use user::UserStore;
