//! Rental catalogue service implementing every driving port.
//!
//! The facade owns the rules that span more than one record: email and
//! amenity-name uniqueness, reference existence, the one-review-per-place
//! rule and delete cascades. Field rules stay on the entities. Every
//! operation validates before it writes; the store remains the final
//! authority on uniqueness, so constraint violations raised by a racing
//! write map to the same errors as the pre-checks.

mod amenities;
mod places;
mod reviews;
mod users;

use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;
use serde_json::json;
use tracing::warn;

use crate::domain::ports::{RepositoryError, constraints};
use crate::domain::{Error, FieldViolation};

/// Service implementing the user, amenity, place and review driving ports.
pub struct HbnbFacade<U, P, A, R> {
    users: Arc<U>,
    places: Arc<P>,
    amenities: Arc<A>,
    reviews: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<U, P, A, R> Clone for HbnbFacade<U, P, A, R> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            places: Arc::clone(&self.places),
            amenities: Arc::clone(&self.amenities),
            reviews: Arc::clone(&self.reviews),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<U, P, A, R> HbnbFacade<U, P, A, R> {
    /// Create a facade over the given repositories.
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use hbnb::domain::HbnbFacade;
    /// # use hbnb::outbound::memory::MemoryStore;
    /// # use mockable::DefaultClock;
    /// let store = Arc::new(MemoryStore::default());
    /// let facade = HbnbFacade::new(
    ///     Arc::clone(&store),
    ///     Arc::clone(&store),
    ///     Arc::clone(&store),
    ///     store,
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = facade;
    /// ```
    pub fn new(
        users: Arc<U>,
        places: Arc<P>,
        amenities: Arc<A>,
        reviews: Arc<R>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            places,
            amenities,
            reviews,
            clock,
        }
    }

    /// Current time at the precision the store keeps.
    ///
    /// PostgreSQL `timestamptz` holds microseconds, so responses built from
    /// a fresh record must not carry finer digits than a later read returns.
    fn now(&self) -> DateTime<Utc> {
        self.clock.utc().trunc_subsecs(6)
    }
}

/// Map an entity validation failure to `InvalidRequest` with the offending
/// field in the details.
pub(crate) fn validation_error(violation: &impl FieldViolation) -> Error {
    Error::invalid_request(violation.to_string()).with_details(json!({
        "field": violation.field(),
        "code": violation.code(),
    }))
}

pub(crate) fn map_repository_error(error: RepositoryError) -> Error {
    match error {
        RepositoryError::Connection { message } => {
            Error::service_unavailable(format!("repository unavailable: {message}"))
        }
        RepositoryError::Query { message } => {
            Error::internal(format!("repository error: {message}"))
        }
        RepositoryError::Duplicate { constraint } => duplicate_error(&constraint),
        RepositoryError::MissingReference { constraint } => missing_reference_error(&constraint),
    }
}

fn duplicate_error(constraint: &str) -> Error {
    match constraint {
        constraints::USERS_EMAIL_KEY => email_taken(),
        constraints::AMENITIES_NAME_KEY => amenity_name_taken(),
        constraints::REVIEWS_USER_PLACE_KEY => already_reviewed(),
        other => {
            warn!(constraint = other, "unrecognised unique constraint violated");
            Error::conflict("Record already exists")
        }
    }
}

fn missing_reference_error(constraint: &str) -> Error {
    match constraint {
        constraints::PLACES_OWNER_FKEY => owner_not_found(),
        constraints::REVIEWS_USER_FKEY => user_not_found(),
        constraints::REVIEWS_PLACE_FKEY | constraints::PLACE_AMENITY_PLACE_FKEY => {
            place_not_found()
        }
        constraints::PLACE_AMENITY_AMENITY_FKEY => amenity_not_found(),
        other => {
            warn!(constraint = other, "unrecognised foreign key violated");
            Error::not_found("Referenced record not found")
        }
    }
}

pub(crate) fn email_taken() -> Error {
    Error::conflict("Email already registered")
}

pub(crate) fn amenity_name_taken() -> Error {
    Error::conflict("Amenity already exists")
}

pub(crate) fn already_reviewed() -> Error {
    Error::conflict("User has already reviewed this place")
}

pub(crate) fn user_not_found() -> Error {
    Error::not_found("User not found")
}

pub(crate) fn owner_not_found() -> Error {
    Error::not_found("Owner not found")
}

pub(crate) fn place_not_found() -> Error {
    Error::not_found("Place not found")
}

pub(crate) fn amenity_not_found() -> Error {
    Error::not_found("Amenity not found")
}

pub(crate) fn review_not_found() -> Error {
    Error::not_found("Review not found")
}


#[cfg(test)]
mod memory_tests;
