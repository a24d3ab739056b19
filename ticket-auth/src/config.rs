use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use config::FileFormat;
use serde::Deserialize;

use crate::password::HashStrategy;
use crate::password::PasswordHasher;
use crate::password::PasswordPolicy;
use crate::token::SigningKey;
use crate::token::DEFAULT_TTL_SECONDS;

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt: JwtConfig,
    #[serde(default)]
    pub password: PasswordConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: i64,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct PasswordConfig {
    #[serde(default)]
    pub strategy: HashStrategy,
    #[serde(default = "default_min_length")]
    pub min_length: usize,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            strategy: HashStrategy::default(),
            min_length: default_min_length(),
        }
    }
}

fn default_ttl_seconds() -> i64 {
    DEFAULT_TTL_SECONDS
}

fn default_min_length() -> usize {
    PasswordPolicy::DEFAULT_MIN_LENGTH
}

impl AuthConfig {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, JWT__TTL_SECONDS, PASSWORD__STRATEGY, ...)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        configuration.try_deserialize()
    }

    /// Parse configuration from a TOML document.
    pub fn from_toml(document: &str) -> Result<Self, ConfigError> {
        ConfigBuilder::builder()
            .add_source(File::from_str(document, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    /// Signing key for the configured secret. Short secrets are logged.
    pub fn signing_key(&self) -> SigningKey {
        let key = SigningKey::new(&self.jwt.secret);
        if key.is_weak() {
            tracing::warn!(
                length = self.jwt.secret.len(),
                recommended = SigningKey::RECOMMENDED_MIN_LENGTH,
                "JWT secret is shorter than recommended"
            );
        }
        key
    }

    pub fn password_hasher(&self) -> PasswordHasher {
        PasswordHasher::new(self.password.strategy)
    }

    pub fn password_policy(&self) -> PasswordPolicy {
        PasswordPolicy::new(self.password.min_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::from_toml(
            r#"
            [jwt]
            secret = "test-secret-key-for-jwt-signing-at-least-32-bytes"
            "#,
        )
        .unwrap();

        assert_eq!(config.jwt.ttl_seconds, 86400);
        assert_eq!(config.password, PasswordConfig::default());
        assert_eq!(config.password_hasher().strategy(), HashStrategy::Argon2);
        assert_eq!(config.password_policy(), PasswordPolicy::new(6));
        assert!(!config.signing_key().is_weak());
    }

    #[test]
    fn test_overrides() {
        let config = AuthConfig::from_toml(
            r#"
            [jwt]
            secret = "demo_secret_change_me"
            ttl_seconds = 3600

            [password]
            strategy = "legacy_sha256"
            min_length = 8
            "#,
        )
        .unwrap();

        assert_eq!(config.jwt.ttl_seconds, 3600);
        assert_eq!(config.password.strategy, HashStrategy::LegacySha256);
        assert_eq!(config.password_policy().min_length, 8);
        assert!(config.signing_key().is_weak());
    }

    #[test]
    fn test_secret_is_required() {
        assert!(AuthConfig::from_toml("[jwt]\nttl_seconds = 60\n").is_err());
    }

    #[test]
    fn test_unknown_strategy_is_rejected() {
        let result = AuthConfig::from_toml(
            r#"
            [jwt]
            secret = "s"

            [password]
            strategy = "md5"
            "#,
        );
        assert!(result.is_err());
    }
}
