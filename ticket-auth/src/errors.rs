use std::fmt;

use thiserror::Error;

use crate::password::PasswordError;
use crate::user::EmailError;
use crate::user::StoreError;

/// Reason attached to an unauthorized outcome.
///
/// Token failures all map to `InvalidToken`, whatever the underlying cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    InvalidToken,
    UserNotFound,
    InvalidCredentials,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Rejection::InvalidToken => "invalid token",
            Rejection::UserNotFound => "user not found",
            Rejection::InvalidCredentials => "invalid credentials",
        };
        f.write_str(message)
    }
}

/// Authentication operation errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Unauthorized: {0}")]
    Unauthorized(Rejection),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid password: {0}")]
    InvalidPassword(PasswordError),

    #[error("Email already registered: {0}")]
    EmailAlreadyRegistered(String),

    #[error("Password error: {0}")]
    Password(PasswordError),

    #[error("User store error: {0}")]
    Store(#[from] StoreError),
}

impl AuthError {
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            AuthError::Unauthorized(rejection) => Some(*rejection),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.rejection().is_some()
    }
}
