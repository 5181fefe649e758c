//! Place data model.
//!
//! A place belongs to one owner and links to any number of amenities. The
//! amenity set is part of the aggregate so a place and its links are always
//! written together.

use chrono::{DateTime, Utc};

use super::ids::{AmenityId, PlaceId, UserId};
use super::validation::{
    FieldViolation, TEXT_MAX, TITLE_MAX, TextViolation, check_optional_text, check_range,
    check_required_text, dedup_preserving_order,
};

/// Latitude bounds, inclusive.
pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
/// Longitude bounds, inclusive.
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

/// Validation errors returned by the [`Place`] constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaceValidationError {
    #[error("title is required")]
    TitleRequired,
    #[error("title must be at most {max} characters")]
    TitleTooLong { max: usize },
    #[error("description must be at most {max} characters")]
    DescriptionTooLong { max: usize },
    #[error("price must be a positive number")]
    InvalidPrice,
    #[error("latitude must be between -90 and 90")]
    LatitudeOutOfRange,
    #[error("longitude must be between -180 and 180")]
    LongitudeOutOfRange,
    #[error("{field} must not contain NUL characters")]
    ContainsNul { field: &'static str },
}

impl FieldViolation for PlaceValidationError {
    fn field(&self) -> &'static str {
        match self {
            Self::TitleRequired | Self::TitleTooLong { .. } => "title",
            Self::DescriptionTooLong { .. } => "description",
            Self::InvalidPrice => "price",
            Self::LatitudeOutOfRange => "latitude",
            Self::LongitudeOutOfRange => "longitude",
            Self::ContainsNul { field } => field,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::TitleRequired => "required",
            Self::TitleTooLong { .. } | Self::DescriptionTooLong { .. } => "too_long",
            Self::InvalidPrice => "not_positive",
            Self::LatitudeOutOfRange | Self::LongitudeOutOfRange => "out_of_range",
            Self::ContainsNul { .. } => "nul_character",
        }
    }
}

/// Attributes supplied when listing a new place.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceDraft {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub owner_id: UserId,
    pub amenity_ids: Vec<AmenityId>,
}

/// Partial attribute set for [`Place::apply`]; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub owner_id: Option<UserId>,
    pub amenity_ids: Option<Vec<AmenityId>>,
}

/// Full stored state of a place, used to rehydrate records from storage.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceState {
    pub id: PlaceId,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub owner_id: UserId,
    pub amenity_ids: Vec<AmenityId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A rentable place.
///
/// ## Invariants
/// - `title` is non-blank and at most 100 characters.
/// - `description` is at most 1000 characters and may be empty.
/// - `price` is finite and strictly positive.
/// - `latitude` lies in [-90, 90] and `longitude` in [-180, 180].
/// - `amenity_ids` holds no duplicates and keeps the order first given.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    state: PlaceState,
}

fn validate(state: &PlaceState) -> Result<(), PlaceValidationError> {
    check_required_text(&state.title, TITLE_MAX).map_err(|violation| match violation {
        TextViolation::Required => PlaceValidationError::TitleRequired,
        TextViolation::TooLong { max } => PlaceValidationError::TitleTooLong { max },
        TextViolation::Nul => PlaceValidationError::ContainsNul { field: "title" },
    })?;
    check_optional_text(&state.description, TEXT_MAX).map_err(|violation| match violation {
        TextViolation::Nul => PlaceValidationError::ContainsNul {
            field: "description",
        },
        TextViolation::Required | TextViolation::TooLong { .. } => {
            PlaceValidationError::DescriptionTooLong { max: TEXT_MAX }
        }
    })?;
    if !(state.price.is_finite() && state.price > 0.0) {
        return Err(PlaceValidationError::InvalidPrice);
    }
    if !check_range(state.latitude, LATITUDE_RANGE.0, LATITUDE_RANGE.1) {
        return Err(PlaceValidationError::LatitudeOutOfRange);
    }
    if !check_range(state.longitude, LONGITUDE_RANGE.0, LONGITUDE_RANGE.1) {
        return Err(PlaceValidationError::LongitudeOutOfRange);
    }
    Ok(())
}

impl Place {
    /// Create a new place with a fresh identifier.
    pub fn create(draft: PlaceDraft, now: DateTime<Utc>) -> Result<Self, PlaceValidationError> {
        let PlaceDraft {
            title,
            description,
            price,
            latitude,
            longitude,
            owner_id,
            amenity_ids,
        } = draft;
        Self::restore(PlaceState {
            id: PlaceId::random(),
            title,
            description,
            price,
            latitude,
            longitude,
            owner_id,
            amenity_ids,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuild a place from stored state, re-running validation.
    pub fn restore(mut state: PlaceState) -> Result<Self, PlaceValidationError> {
        validate(&state)?;
        state.amenity_ids = dedup_preserving_order(state.amenity_ids);
        Ok(Self { state })
    }

    /// Merge `update` into this place. Nothing changes unless the merged
    /// attribute set validates.
    pub fn apply(&mut self, update: PlaceUpdate, now: DateTime<Utc>) -> Result<(), PlaceValidationError> {
        let mut state = self.state.clone();
        if let Some(title) = update.title {
            state.title = title;
        }
        if let Some(description) = update.description {
            state.description = description;
        }
        if let Some(price) = update.price {
            state.price = price;
        }
        if let Some(latitude) = update.latitude {
            state.latitude = latitude;
        }
        if let Some(longitude) = update.longitude {
            state.longitude = longitude;
        }
        if let Some(owner_id) = update.owner_id {
            state.owner_id = owner_id;
        }
        if let Some(amenity_ids) = update.amenity_ids {
            state.amenity_ids = amenity_ids;
        }
        state.updated_at = now;
        *self = Self::restore(state)?;
        Ok(())
    }

    /// Drop a link to an amenity that no longer exists.
    pub fn unlink_amenity(&mut self, amenity_id: &AmenityId) {
        self.state.amenity_ids.retain(|id| id != amenity_id);
    }

    pub fn id(&self) -> &PlaceId {
        &self.state.id
    }

    pub fn title(&self) -> &str {
        self.state.title.as_str()
    }

    pub fn description(&self) -> &str {
        self.state.description.as_str()
    }

    pub fn price(&self) -> f64 {
        self.state.price
    }

    pub fn latitude(&self) -> f64 {
        self.state.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.state.longitude
    }

    pub fn owner_id(&self) -> &UserId {
        &self.state.owner_id
    }

    /// Linked amenities, in the order first given.
    pub fn amenity_ids(&self) -> &[AmenityId] {
        &self.state.amenity_ids
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.state.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.state.updated_at
    }
}
