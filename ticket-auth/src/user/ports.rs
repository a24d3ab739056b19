use async_trait::async_trait;

use super::errors::StoreError;
use super::models::NewUser;
use super::models::User;
use super::models::UserId;

/// Read access to registered users.
///
/// Timeouts and cancellation are the implementation's responsibility.
#[async_trait]
pub trait UserLookup: Send + Sync + 'static {
    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Unavailable` - Storage could not be reached
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError>;

    /// Retrieve user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Unavailable` - Storage could not be reached
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}

/// User persistence needed by registration.
#[async_trait]
pub trait UserStore: UserLookup {
    /// Persist a new user and assign its identifier.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Unavailable` - Storage could not be reached
    async fn insert(&self, user: NewUser) -> Result<User, StoreError>;
}
