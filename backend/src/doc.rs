//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint of the inbound layer together
//! with the request and response bodies and the error envelope. The document
//! is served by Swagger UI in debug builds and exported by the
//! `openapi-dump` binary for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::amenities::{AmenityBody, AmenityResponse};
use crate::inbound::http::places::{
    AmenitySummary, OwnerSummary, PlaceCreateBody, PlaceDetailsResponse, PlaceResponse,
    PlaceSummary, PlaceUpdateBody,
};
use crate::inbound::http::reviews::{ReviewCreateBody, ReviewResponse, ReviewUpdateBody};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, MessageResponse};
use crate::inbound::http::users::{UserCreateBody, UserResponse, UserUpdateBody};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "HBnB API",
        description = "Property rental catalogue: users, places, amenities and reviews."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::amenities::create_amenity,
        crate::inbound::http::amenities::list_amenities,
        crate::inbound::http::amenities::get_amenity,
        crate::inbound::http::amenities::update_amenity,
        crate::inbound::http::amenities::delete_amenity,
        crate::inbound::http::places::create_place,
        crate::inbound::http::places::list_places,
        crate::inbound::http::places::get_place,
        crate::inbound::http::places::update_place,
        crate::inbound::http::places::delete_place,
        crate::inbound::http::reviews::create_review,
        crate::inbound::http::reviews::list_reviews,
        crate::inbound::http::reviews::get_review,
        crate::inbound::http::reviews::update_review,
        crate::inbound::http::reviews::delete_review,
        crate::inbound::http::reviews::list_reviews_for_place,
        crate::inbound::http::reviews::list_place_reviews,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        MessageResponse,
        UserCreateBody,
        UserUpdateBody,
        UserResponse,
        AmenityBody,
        AmenityResponse,
        PlaceCreateBody,
        PlaceUpdateBody,
        PlaceResponse,
        PlaceSummary,
        PlaceDetailsResponse,
        OwnerSummary,
        AmenitySummary,
        ReviewCreateBody,
        ReviewUpdateBody,
        ReviewResponse,
    )),
    tags(
        (name = "users", description = "Registered users"),
        (name = "amenities", description = "Amenities places can offer"),
        (name = "places", description = "Rental listings"),
        (name = "reviews", description = "Guest reviews of places"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
