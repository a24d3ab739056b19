use super::errors::PasswordError;

/// Constraints checked on a plaintext password before it is hashed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub min_length: usize,
}

impl PasswordPolicy {
    pub const DEFAULT_MIN_LENGTH: usize = 6;

    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }

    /// Check `password` against the policy. Length counts characters, not bytes.
    ///
    /// # Errors
    /// * `TooShort` - Fewer than `min_length` characters
    pub fn check(&self, password: &str) -> Result<(), PasswordError> {
        let actual = password.chars().count();
        if actual < self.min_length {
            return Err(PasswordError::TooShort {
                min: self.min_length,
                actual,
            });
        }
        Ok(())
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN_LENGTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_min_length() {
        let policy = PasswordPolicy::default();

        assert!(policy.check("secret").is_ok());
        assert_eq!(
            policy.check("short"),
            Err(PasswordError::TooShort { min: 6, actual: 5 })
        );
    }

    #[test]
    fn test_counts_characters() {
        // six characters, twelve bytes
        assert!(PasswordPolicy::default().check("éééééé").is_ok());
    }
}
