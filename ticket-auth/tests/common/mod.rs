use std::sync::Arc;

use async_trait::async_trait;
use ticket_auth::user::NewUser;
use ticket_auth::user::StoreError;
use ticket_auth::Authenticator;
use ticket_auth::User;
use ticket_auth::UserId;
use ticket_auth::UserLookup;
use ticket_auth::UserStore;
use tokio::sync::RwLock;

pub const SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

/// User store backed by a vector, ids assigned from 1
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserStore {
    pub async fn remove(&self, id: UserId) {
        self.users.write().await.retain(|user| user.id != id);
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserLookup for InMemoryUserStore {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|user| user.email.as_str() == email)
            .cloned())
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;

        if users.iter().any(|existing| existing.email == user.email) {
            return Err(StoreError::EmailAlreadyExists(user.email.to_string()));
        }

        let next_id = users.iter().map(|user| user.id.0).max().unwrap_or(0) + 1;
        let created = User {
            id: UserId(next_id),
            email: user.email,
            password_hash: user.password_hash,
            full_name: user.full_name,
        };
        users.push(created.clone());

        Ok(created)
    }
}

/// Authenticator over a fresh in-memory store
pub fn test_authenticator() -> (Authenticator<InMemoryUserStore>, Arc<InMemoryUserStore>) {
    let store = Arc::new(InMemoryUserStore::default());
    let authenticator = Authenticator::new(Arc::clone(&store), SECRET);
    (authenticator, store)
}
