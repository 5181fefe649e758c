//! HTTP inbound adapter exposing the REST endpoints under `/api/v1`.
//!
//! Handlers translate JSON bodies into domain drafts and updates, call the
//! driving ports held in [`state::HttpState`], and map results back to JSON.
//! Apps serving these routes should also wrap
//! `actix_web::middleware::NormalizePath::trim()` so `/users/` and `/users`
//! resolve to the same handler.

pub mod amenities;
pub mod error;
pub mod health;
pub mod places;
pub mod reviews;
pub mod schemas;
pub mod state;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register the `/api/v1` scope and its JSON error handling.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use actix_web::middleware::NormalizePath;
///
/// let _app = App::new()
///     .wrap(NormalizePath::trim())
///     .configure(hbnb::inbound::http::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .service(
            web::scope("/api/v1")
                .service(users::create_user)
                .service(users::list_users)
                .service(users::get_user)
                .service(users::update_user)
                .service(users::delete_user)
                .service(amenities::create_amenity)
                .service(amenities::list_amenities)
                .service(amenities::get_amenity)
                .service(amenities::update_amenity)
                .service(amenities::delete_amenity)
                .service(places::create_place)
                .service(places::list_places)
                .service(places::get_place)
                .service(places::update_place)
                .service(places::delete_place)
                .service(reviews::list_place_reviews)
                .service(reviews::create_review)
                .service(reviews::list_reviews)
                .service(reviews::list_reviews_for_place)
                .service(reviews::get_review)
                .service(reviews::update_review)
                .service(reviews::delete_review),
        );
}
