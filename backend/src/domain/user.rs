//! User data model.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use super::ids::UserId;
use super::password::HashedPassword;
use super::validation::{FieldViolation, NAME_MAX, TextViolation, check_required_text};

/// Maximum length of an email address.
pub const EMAIL_MAX: usize = 254;

/// Validation errors returned by the [`User`] constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("first_name is required")]
    FirstNameRequired,
    #[error("first_name must be at most {max} characters")]
    FirstNameTooLong { max: usize },
    #[error("last_name is required")]
    LastNameRequired,
    #[error("last_name must be at most {max} characters")]
    LastNameTooLong { max: usize },
    #[error("email must be a valid email address")]
    InvalidEmail,
    #[error("{field} must not contain NUL characters")]
    ContainsNul { field: &'static str },
}

impl FieldViolation for UserValidationError {
    fn field(&self) -> &'static str {
        match self {
            Self::FirstNameRequired | Self::FirstNameTooLong { .. } => "first_name",
            Self::LastNameRequired | Self::LastNameTooLong { .. } => "last_name",
            Self::InvalidEmail => "email",
            Self::ContainsNul { field } => field,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::FirstNameRequired | Self::LastNameRequired => "required",
            Self::FirstNameTooLong { .. } | Self::LastNameTooLong { .. } => "too_long",
            Self::InvalidEmail => "invalid_email",
            Self::ContainsNul { .. } => "nul_character",
        }
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Email address, trimmed and lowercased so uniqueness is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Validate and normalise an email address.
    ///
    /// # Examples
    /// ```
    /// use hbnb::domain::Email;
    ///
    /// let email = Email::new("  Ada@Example.COM ").expect("valid email");
    /// assert_eq!(email.as_ref(), "ada@example.com");
    /// assert!(Email::new("not-an-email").is_err());
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalised = raw.as_ref().trim().to_lowercase();
        if normalised.chars().count() > EMAIL_MAX || !email_regex().is_match(&normalised) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(normalised))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Attributes supplied when registering a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_admin: bool,
}

/// Partial attribute set for [`User::apply`]; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub is_admin: Option<bool>,
}

/// Full stored state of a user, used to rehydrate records from storage.
#[derive(Debug, Clone)]
pub struct UserState {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: Option<HashedPassword>,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registered user.
///
/// ## Invariants
/// - `first_name` and `last_name` are non-blank and at most 50 characters.
/// - `email` matches the address grammar and is stored lowercase.
/// - `id` and `created_at` never change after creation.
#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    first_name: String,
    last_name: String,
    email: Email,
    password: Option<HashedPassword>,
    is_admin: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn name_violation(
    violation: TextViolation,
    field: &'static str,
    required: UserValidationError,
    too_long: fn(usize) -> UserValidationError,
) -> UserValidationError {
    match violation {
        TextViolation::Required => required,
        TextViolation::TooLong { max } => too_long(max),
        TextViolation::Nul => UserValidationError::ContainsNul { field },
    }
}

impl User {
    /// Register a new user with a fresh identifier.
    pub fn create(draft: UserDraft, now: DateTime<Utc>) -> Result<Self, UserValidationError> {
        let UserDraft {
            first_name,
            last_name,
            email,
            is_admin,
        } = draft;
        Self::restore(UserState {
            id: UserId::random(),
            first_name,
            last_name,
            email,
            password: None,
            is_admin,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuild a user from stored state, re-running field validation.
    pub fn restore(state: UserState) -> Result<Self, UserValidationError> {
        check_required_text(&state.first_name, NAME_MAX).map_err(|v| {
            name_violation(v, "first_name", UserValidationError::FirstNameRequired, |max| {
                UserValidationError::FirstNameTooLong { max }
            })
        })?;
        check_required_text(&state.last_name, NAME_MAX).map_err(|v| {
            name_violation(v, "last_name", UserValidationError::LastNameRequired, |max| {
                UserValidationError::LastNameTooLong { max }
            })
        })?;
        let email = Email::new(&state.email)?;

        Ok(Self {
            id: state.id,
            first_name: state.first_name,
            last_name: state.last_name,
            email,
            password: state.password,
            is_admin: state.is_admin,
            created_at: state.created_at,
            updated_at: state.updated_at,
        })
    }

    /// Merge `update` into this user. Nothing changes unless the merged
    /// attribute set validates.
    pub fn apply(&mut self, update: UserUpdate, now: DateTime<Utc>) -> Result<(), UserValidationError> {
        let mut state = self.to_state();
        if let Some(first_name) = update.first_name {
            state.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            state.last_name = last_name;
        }
        if let Some(email) = update.email {
            state.email = email;
        }
        if let Some(is_admin) = update.is_admin {
            state.is_admin = is_admin;
        }
        state.updated_at = now;
        *self = Self::restore(state)?;
        Ok(())
    }

    /// Replace the stored password hash.
    pub fn set_password(&mut self, password: HashedPassword, now: DateTime<Utc>) {
        self.password = Some(password);
        self.updated_at = now;
    }

    /// Snapshot of the full state.
    pub fn to_state(&self) -> UserState {
        UserState {
            id: self.id.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.as_ref().to_owned(),
            password: self.password.clone(),
            is_admin: self.is_admin,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn first_name(&self) -> &str {
        self.first_name.as_str()
    }

    pub fn last_name(&self) -> &str {
        self.last_name.as_str()
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Stored password hash, if the user has set a password.
    pub fn password(&self) -> Option<&HashedPassword> {
        self.password.as_ref()
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests;
