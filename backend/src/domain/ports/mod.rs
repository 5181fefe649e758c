//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by the outbound adapters;
//! driving ports (`*Service`) are implemented by [`crate::domain::HbnbFacade`]
//! and consumed by the HTTP adapter.

mod macros;
pub(crate) use macros::define_port_error;

mod amenities_service;
mod amenity_repository;
mod place_repository;
mod places_service;
mod repository_error;
mod review_repository;
mod reviews_service;
mod user_repository;
mod users_service;

#[cfg(test)]
pub use amenities_service::MockAmenitiesService;
pub use amenities_service::AmenitiesService;
#[cfg(test)]
pub use amenity_repository::MockAmenityRepository;
pub use amenity_repository::AmenityRepository;
#[cfg(test)]
pub use place_repository::MockPlaceRepository;
pub use place_repository::PlaceRepository;
#[cfg(test)]
pub use places_service::MockPlacesService;
pub use places_service::{PlaceDetails, PlacesService};
pub use repository_error::{RepositoryError, constraints};
#[cfg(test)]
pub use review_repository::MockReviewRepository;
pub use review_repository::ReviewRepository;
#[cfg(test)]
pub use reviews_service::MockReviewsService;
pub use reviews_service::ReviewsService;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::UserRepository;
#[cfg(test)]
pub use users_service::MockUsersService;
pub use users_service::{CreateUserRequest, UpdateUserRequest, UsersService};
