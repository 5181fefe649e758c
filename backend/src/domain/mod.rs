//! Domain primitives, aggregates and ports.
//!
//! Purpose: Define the rental catalogue entities (users, places, amenities
//! and reviews) together with their field rules, plus the ports adapters
//! implement. Entities validate on construction and on every update, so a
//! value held by the domain is always valid.
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic error payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - User, Place, Amenity, Review: the four aggregates.
//! - HbnbFacade: the service implementing every driving port.

pub mod amenity;
pub mod error;
pub mod facade;
pub mod ids;
pub mod password;
pub mod place;
pub mod ports;
pub mod review;
pub mod user;
pub mod validation;

pub use self::amenity::{Amenity, AmenityValidationError};
pub use self::error::{Error, ErrorCode};
pub use self::facade::HbnbFacade;
pub use self::ids::{AmenityId, IdValidationError, PlaceId, ReviewId, UserId};
pub use self::password::{
    HashedPassword, Password, PasswordHashError, PasswordValidationError, PASSWORD_MAX,
    PASSWORD_MIN,
};
pub use self::place::{Place, PlaceDraft, PlaceState, PlaceUpdate, PlaceValidationError};
pub use self::review::{
    Rating, Review, ReviewDraft, ReviewState, ReviewUpdate, ReviewValidationError,
};
pub use self::user::{Email, User, UserDraft, UserState, UserUpdate, UserValidationError};
pub use self::validation::{FieldViolation, NAME_MAX, TEXT_MAX, TITLE_MAX};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use hbnb::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<()> {
///     Err(Error::not_found("User not found"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
