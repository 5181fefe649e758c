//! Error type shared by every repository port.

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by repository adapters.
    pub enum RepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "repository query failed: {message}",
        /// A unique constraint rejected the write.
        Duplicate { constraint: String } => "unique constraint violated: {constraint}",
        /// A foreign key pointed at a record that does not exist.
        MissingReference { constraint: String } => "referenced record missing: {constraint}",
    }
}

/// Constraint names shared by the adapters so the facade can tell which
/// uniqueness rule or reference failed.
pub mod constraints {
    pub const USERS_EMAIL_KEY: &str = "users_email_key";
    pub const AMENITIES_NAME_KEY: &str = "amenities_name_key";
    pub const REVIEWS_USER_PLACE_KEY: &str = "reviews_user_id_place_id_key";
    pub const PLACES_OWNER_FKEY: &str = "places_owner_id_fkey";
    pub const REVIEWS_USER_FKEY: &str = "reviews_user_id_fkey";
    pub const REVIEWS_PLACE_FKEY: &str = "reviews_place_id_fkey";
    pub const PLACE_AMENITY_PLACE_FKEY: &str = "place_amenity_place_id_fkey";
    pub const PLACE_AMENITY_AMENITY_FKEY: &str = "place_amenity_amenity_id_fkey";
}
