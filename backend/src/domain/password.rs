//! User passwords.
//!
//! Plaintext only lives in [`Password`] long enough to be hashed; records
//! carry a [`HashedPassword`] holding an argon2 PHC string.

use std::fmt;

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use super::validation::FieldViolation;

/// Minimum accepted password length.
pub const PASSWORD_MIN: usize = 8;
/// Maximum accepted password length.
pub const PASSWORD_MAX: usize = 128;

/// Password policy failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordValidationError {
    #[error("password must be at least {min} characters")]
    TooShort { min: usize },
    #[error("password must be at most {max} characters")]
    TooLong { max: usize },
}

impl FieldViolation for PasswordValidationError {
    fn field(&self) -> &'static str {
        "password"
    }

    fn code(&self) -> &'static str {
        match self {
            Self::TooShort { .. } => "too_short",
            Self::TooLong { .. } => "too_long",
        }
    }
}

/// Hashing or parsing a stored hash failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("password hashing failed: {message}")]
pub struct PasswordHashError {
    message: String,
}

/// Plaintext password that satisfies the length policy.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    /// Validate a plaintext password against the length policy.
    pub fn new(raw: impl Into<String>) -> Result<Self, PasswordValidationError> {
        let raw = raw.into();
        let length = raw.chars().count();
        if length < PASSWORD_MIN {
            return Err(PasswordValidationError::TooShort { min: PASSWORD_MIN });
        }
        if length > PASSWORD_MAX {
            return Err(PasswordValidationError::TooLong { max: PASSWORD_MAX });
        }
        Ok(Self(raw))
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Argon2 PHC string for a user password.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Hash a password with a fresh random salt.
    ///
    /// # Examples
    /// ```
    /// use hbnb::domain::{HashedPassword, Password};
    ///
    /// let password = Password::new("correct horse").expect("policy");
    /// let hashed = HashedPassword::hash(&password).expect("hash");
    /// assert!(hashed.verify("correct horse"));
    /// assert!(!hashed.verify("wrong horse"));
    /// ```
    pub fn hash(password: &Password) -> Result<Self, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let phc = Argon2::default()
            .hash_password(password.0.as_bytes(), &salt)
            .map_err(|err| PasswordHashError {
                message: err.to_string(),
            })?
            .to_string();
        Ok(Self(phc))
    }

    /// Wrap a PHC string read back from storage.
    pub fn from_phc(phc: impl Into<String>) -> Result<Self, PasswordHashError> {
        let phc = phc.into();
        PasswordHash::new(&phc).map_err(|err| PasswordHashError {
            message: err.to_string(),
        })?;
        Ok(Self(phc))
    }

    /// Check a plaintext candidate against the stored hash.
    ///
    /// This is the credential check for a future login flow. No endpoint
    /// authenticates yet; the persistence tests use it to confirm that a
    /// stored hash still matches the password it was built from.
    ///
    /// ```rust
    /// # use hbnb::domain::{HashedPassword, Password};
    /// let password = Password::new("correct horse").expect("policy");
    /// let hashed = HashedPassword::hash(&password).expect("hash");
    /// assert!(hashed.verify("correct horse"));
    /// assert!(!hashed.verify("battery staple"));
    /// ```
    pub fn verify(&self, candidate: &str) -> bool {
        match PasswordHash::new(&self.0) {
            Ok(parsed) => Argon2::default()
                .verify_password(candidate.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    /// The PHC string, for persistence adapters.
    pub fn as_phc(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashedPassword(<redacted>)")
    }
}
