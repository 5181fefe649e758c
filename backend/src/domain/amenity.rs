//! Amenity data model.

use chrono::{DateTime, Utc};

use super::ids::AmenityId;
use super::validation::{FieldViolation, NAME_MAX, TextViolation, check_required_text};

/// Validation errors returned by the [`Amenity`] constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmenityValidationError {
    #[error("name is required")]
    NameRequired,
    #[error("name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("name must not contain NUL characters")]
    NameContainsNul,
}

impl FieldViolation for AmenityValidationError {
    fn field(&self) -> &'static str {
        "name"
    }

    fn code(&self) -> &'static str {
        match self {
            Self::NameRequired => "required",
            Self::NameTooLong { .. } => "too_long",
            Self::NameContainsNul => "nul_character",
        }
    }
}

impl From<TextViolation> for AmenityValidationError {
    fn from(value: TextViolation) -> Self {
        match value {
            TextViolation::Required => Self::NameRequired,
            TextViolation::TooLong { max } => Self::NameTooLong { max },
            TextViolation::Nul => Self::NameContainsNul,
        }
    }
}

/// A feature a place can offer, such as "Wi-Fi".
///
/// ## Invariants
/// - `name` is non-blank and at most 50 characters. Uniqueness across
///   amenities is enforced by the facade and the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Amenity {
    id: AmenityId,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Amenity {
    /// Create a new amenity with a fresh identifier.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use hbnb::domain::Amenity;
    ///
    /// let amenity = Amenity::create("Swimming Pool", Utc::now()).expect("valid amenity");
    /// assert_eq!(amenity.name(), "Swimming Pool");
    /// assert!(Amenity::create("  ", Utc::now()).is_err());
    /// ```
    pub fn create(name: impl Into<String>, now: DateTime<Utc>) -> Result<Self, AmenityValidationError> {
        Self::restore(AmenityId::random(), name.into(), now, now)
    }

    /// Rebuild an amenity from stored state, re-running validation.
    pub fn restore(
        id: AmenityId,
        name: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, AmenityValidationError> {
        check_required_text(&name, NAME_MAX)?;
        Ok(Self {
            id,
            name,
            created_at,
            updated_at,
        })
    }

    /// Rename the amenity. The current name is kept if validation fails.
    pub fn rename(&mut self, name: impl Into<String>, now: DateTime<Utc>) -> Result<(), AmenityValidationError> {
        let name = name.into();
        check_required_text(&name, NAME_MAX)?;
        self.name = name;
        self.updated_at = now;
        Ok(())
    }

    pub fn id(&self) -> &AmenityId {
        &self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
