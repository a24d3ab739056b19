use std::sync::Arc;

use crate::errors::AuthError;
use crate::errors::Rejection;
use crate::token::TokenSigner;
use crate::user::Principal;
use crate::user::UserId;
use crate::user::UserLookup;

/// Turns a bearer token into the principal it was issued for.
///
/// Every verification failure is reported as the same
/// `Unauthorized(InvalidToken)`; only the debug log records which check failed.
pub struct Resolver<L: UserLookup> {
    signer: TokenSigner,
    users: Arc<L>,
}

impl<L: UserLookup> Resolver<L> {
    pub fn new(signer: TokenSigner, users: Arc<L>) -> Self {
        Self { signer, users }
    }

    /// Resolve a raw token.
    ///
    /// # Errors
    /// * `Unauthorized(InvalidToken)` - Token fails verification or has no usable `sub`
    /// * `Unauthorized(UserNotFound)` - Subject no longer exists
    /// * `Store` - User lookup failed
    pub async fn resolve(&self, token: &str) -> Result<Principal, AuthError> {
        let claims = self.signer.verify(token).map_err(|e| {
            tracing::debug!(reason = %e, "Token verification failed");
            AuthError::Unauthorized(Rejection::InvalidToken)
        })?;

        let user_id = claims.subject_id().map(UserId).ok_or_else(|| {
            tracing::debug!("Token has no integer subject");
            AuthError::Unauthorized(Rejection::InvalidToken)
        })?;

        let user = self.users.find_by_id(&user_id).await?.ok_or_else(|| {
            tracing::debug!(user_id = %user_id, "Token subject not found");
            AuthError::Unauthorized(Rejection::UserNotFound)
        })?;

        Ok(Principal::from(&user))
    }

    /// Resolve the value of an `Authorization` header.
    pub async fn resolve_bearer(&self, authorization: &str) -> Result<Principal, AuthError> {
        let token = bearer_token(authorization)
            .ok_or(AuthError::Unauthorized(Rejection::InvalidToken))?;
        self.resolve(token).await
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
///
/// The scheme is matched case-insensitively.
pub fn bearer_token(authorization: &str) -> Option<&str> {
    let (scheme, token) = authorization.trim().split_once(' ')?;
    let token = token.trim();

    if scheme.eq_ignore_ascii_case("Bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}
