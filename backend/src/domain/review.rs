//! Review data model.

use chrono::{DateTime, Utc};

use super::ids::{PlaceId, ReviewId, UserId};
use super::validation::{FieldViolation, TEXT_MAX, TextViolation, check_required_text};

/// Validation errors returned by the [`Review`] constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReviewValidationError {
    #[error("text is required")]
    TextRequired,
    #[error("text must be at most {max} characters")]
    TextTooLong { max: usize },
    #[error("rating must be between 1 and 5")]
    RatingOutOfRange,
    #[error("text must not contain NUL characters")]
    TextContainsNul,
}

impl FieldViolation for ReviewValidationError {
    fn field(&self) -> &'static str {
        match self {
            Self::TextRequired | Self::TextTooLong { .. } | Self::TextContainsNul => "text",
            Self::RatingOutOfRange => "rating",
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::TextRequired => "required",
            Self::TextTooLong { .. } => "too_long",
            Self::RatingOutOfRange => "out_of_range",
            Self::TextContainsNul => "nul_character",
        }
    }
}

/// Star rating between 1 and 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Validate a rating.
    ///
    /// # Examples
    /// ```
    /// use hbnb::domain::Rating;
    ///
    /// assert_eq!(Rating::new(5).map(|r| r.get()), Ok(5));
    /// assert!(Rating::new(6).is_err());
    /// ```
    pub fn new(value: i64) -> Result<Self, ReviewValidationError> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Self)
            .ok_or(ReviewValidationError::RatingOutOfRange)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

/// Attributes supplied when posting a review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDraft {
    pub text: String,
    pub rating: i64,
    pub user_id: UserId,
    pub place_id: PlaceId,
}

/// Partial attribute set for [`Review::apply`]. Authorship and the reviewed
/// place are fixed once a review exists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewUpdate {
    pub text: Option<String>,
    pub rating: Option<i64>,
}

/// Full stored state of a review, used to rehydrate records from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewState {
    pub id: ReviewId,
    pub text: String,
    pub rating: i64,
    pub user_id: UserId,
    pub place_id: PlaceId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user's review of a place. A user reviews a given place at most once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    id: ReviewId,
    text: String,
    rating: Rating,
    user_id: UserId,
    place_id: PlaceId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Review {
    /// Create a new review with a fresh identifier.
    pub fn create(draft: ReviewDraft, now: DateTime<Utc>) -> Result<Self, ReviewValidationError> {
        let ReviewDraft {
            text,
            rating,
            user_id,
            place_id,
        } = draft;
        Self::restore(ReviewState {
            id: ReviewId::random(),
            text,
            rating,
            user_id,
            place_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuild a review from stored state, re-running validation.
    pub fn restore(state: ReviewState) -> Result<Self, ReviewValidationError> {
        check_required_text(&state.text, TEXT_MAX).map_err(|violation| match violation {
            TextViolation::Required => ReviewValidationError::TextRequired,
            TextViolation::TooLong { max } => ReviewValidationError::TextTooLong { max },
            TextViolation::Nul => ReviewValidationError::TextContainsNul,
        })?;
        let rating = Rating::new(state.rating)?;
        Ok(Self {
            id: state.id,
            text: state.text,
            rating,
            user_id: state.user_id,
            place_id: state.place_id,
            created_at: state.created_at,
            updated_at: state.updated_at,
        })
    }

    /// Merge `update` into this review. Nothing changes unless the merged
    /// attribute set validates.
    pub fn apply(&mut self, update: ReviewUpdate, now: DateTime<Utc>) -> Result<(), ReviewValidationError> {
        let state = ReviewState {
            id: self.id.clone(),
            text: update.text.unwrap_or_else(|| self.text.clone()),
            rating: update.rating.unwrap_or_else(|| i64::from(self.rating.get())),
            user_id: self.user_id.clone(),
            place_id: self.place_id.clone(),
            created_at: self.created_at,
            updated_at: now,
        };
        *self = Self::restore(state)?;
        Ok(())
    }

    pub fn id(&self) -> &ReviewId {
        &self.id
    }

    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    /// Author of the review.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn place_id(&self) -> &PlaceId {
        &self.place_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
