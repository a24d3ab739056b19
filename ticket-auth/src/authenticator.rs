use std::sync::Arc;
use std::sync::OnceLock;

use serde::Serialize;

use crate::config::AuthConfig;
use crate::errors::AuthError;
use crate::errors::Rejection;
use crate::password::CredentialHasher;
use crate::password::PasswordHasher;
use crate::password::PasswordPolicy;
use crate::resolver::Resolver;
use crate::token::Claims;
use crate::token::SigningKey;
use crate::token::TokenSigner;
use crate::token::DEFAULT_TTL_SECONDS;
use crate::user::EmailAddress;
use crate::user::NewUser;
use crate::user::Principal;
use crate::user::StoreError;
use crate::user::UserId;
use crate::user::UserStore;

/// Authentication coordinator combining password verification and token issuance.
///
/// Owns the registration and login flows and delegates token resolution to a
/// [`Resolver`] sharing the same key and store.
pub struct Authenticator<S: UserStore> {
    users: Arc<S>,
    hasher: Arc<dyn CredentialHasher>,
    policy: PasswordPolicy,
    signer: TokenSigner,
    resolver: Resolver<S>,
    token_ttl_seconds: i64,
    /// Hash checked on unknown emails so both login failures cost one verify.
    decoy_hash: OnceLock<Option<String>>,
}

/// Plaintext behind the decoy hash.
const DECOY_PASSWORD: &str = "ticket-auth decoy credential";

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessToken {
    /// Signed bearer token
    pub access_token: String,
    pub token_type: String,
}

impl AccessToken {
    fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Registration request with unvalidated fields.
#[derive(Debug, Clone)]
pub struct RegisterCommand {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
}

impl<S: UserStore> Authenticator<S> {
    /// Create a new authenticator with Argon2 hashing, the default password
    /// policy and a 24 hour token lifetime.
    ///
    /// # Arguments
    /// * `users` - User store implementation
    /// * `key` - Secret key for token signing
    pub fn new(users: Arc<S>, key: impl Into<SigningKey>) -> Self {
        let signer = TokenSigner::new(key);
        Self {
            resolver: Resolver::new(signer.clone(), Arc::clone(&users)),
            users,
            hasher: Arc::new(PasswordHasher::default()),
            policy: PasswordPolicy::default(),
            signer,
            token_ttl_seconds: DEFAULT_TTL_SECONDS,
            decoy_hash: OnceLock::new(),
        }
    }

    /// Create an authenticator from loaded configuration.
    pub fn from_config(config: &AuthConfig, users: Arc<S>) -> Self {
        Self::new(users, config.signing_key())
            .with_hasher(Arc::new(config.password_hasher()))
            .with_password_policy(config.password_policy())
            .with_token_ttl(config.jwt.ttl_seconds)
    }

    pub fn with_hasher(mut self, hasher: Arc<dyn CredentialHasher>) -> Self {
        self.hasher = hasher;
        self.decoy_hash = OnceLock::new();
        self
    }

    pub fn with_password_policy(mut self, policy: PasswordPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_token_ttl(mut self, ttl_seconds: i64) -> Self {
        self.token_ttl_seconds = ttl_seconds;
        self
    }

    pub fn resolver(&self) -> &Resolver<S> {
        &self.resolver
    }

    /// Register a new user.
    ///
    /// # Returns
    /// Principal of the created user
    ///
    /// # Errors
    /// * `InvalidEmail` - Email is not well formed
    /// * `InvalidPassword` - Password violates the policy
    /// * `EmailAlreadyRegistered` - Email is taken
    /// * `Password` - Hashing failed
    /// * `Store` - Persistence failed
    pub async fn register(&self, command: RegisterCommand) -> Result<Principal, AuthError> {
        let email = EmailAddress::new(command.email)?;
        self.policy
            .check(&command.password)
            .map_err(AuthError::InvalidPassword)?;

        if self.users.find_by_email(email.as_str()).await?.is_some() {
            return Err(AuthError::EmailAlreadyRegistered(email.to_string()));
        }

        let password_hash = self
            .hasher
            .hash(&command.password)
            .map_err(AuthError::Password)?;

        let user = self
            .users
            .insert(NewUser {
                email,
                password_hash,
                full_name: command.full_name,
            })
            .await
            .map_err(|e| match e {
                StoreError::EmailAlreadyExists(email) => AuthError::EmailAlreadyRegistered(email),
                other => AuthError::Store(other),
            })?;

        tracing::info!(user_id = %user.id, "User registered");

        Ok(Principal::from(&user))
    }

    /// Verify credentials and issue a token for the user.
    ///
    /// Unknown email and wrong password produce the same error, and both run
    /// one password verification.
    ///
    /// # Errors
    /// * `Unauthorized(InvalidCredentials)` - Email unknown or password wrong
    /// * `Store` - User lookup failed
    pub async fn login(&self, email: &str, password: &str) -> Result<AccessToken, AuthError> {
        let user = match self.users.find_by_email(email).await? {
            Some(user) => {
                Some(user).filter(|user| self.hasher.verify(password, &user.password_hash))
            }
            None => {
                if let Some(decoy) = self.decoy_hash() {
                    self.hasher.verify(password, decoy);
                }
                None
            }
        };

        let Some(user) = user else {
            tracing::info!("Login rejected");
            return Err(AuthError::Unauthorized(Rejection::InvalidCredentials));
        };

        if self.hasher.needs_rehash(&user.password_hash) {
            tracing::info!(user_id = %user.id, "Stored credential uses an outdated hash strategy");
        }
        tracing::info!(user_id = %user.id, "Login succeeded");

        Ok(AccessToken::bearer(self.issue_token(user.id)))
    }

    fn decoy_hash(&self) -> Option<&str> {
        self.decoy_hash
            .get_or_init(|| match self.hasher.hash(DECOY_PASSWORD) {
                Ok(hash) => Some(hash),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to derive decoy credential hash");
                    None
                }
            })
            .as_deref()
    }

    /// Issue a token for `user_id` without checking credentials.
    ///
    /// Useful when authentication has already been established by other means.
    pub fn issue_token(&self, user_id: UserId) -> String {
        self.signer
            .issue(Claims::new().with_subject(user_id.0), self.token_ttl_seconds)
    }

    /// Resolve the principal behind a bearer token.
    pub async fn current_user(&self, token: &str) -> Result<Principal, AuthError> {
        self.resolver.resolve(token).await
    }
}
