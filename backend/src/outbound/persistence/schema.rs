//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. `creation_seq`
//! is database-generated and never written by the adapters. Regenerate
//! with `diesel print-schema` when a migration changes a table.

diesel::table! {
    /// Registered users. `email` is unique and stored lowercase.
    users (id) {
        id -> Uuid,
        first_name -> Varchar,
        last_name -> Varchar,
        email -> Varchar,
        /// Argon2 PHC string; null when the user never set a password.
        password_hash -> Nullable<Text>,
        is_admin -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        /// Insertion order; listings sort on it.
        creation_seq -> Int8,
    }
}

diesel::table! {
    /// Amenity catalogue. `name` is unique.
    amenities (id) {
        id -> Uuid,
        name -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        /// Insertion order; listings sort on it.
        creation_seq -> Int8,
    }
}

diesel::table! {
    /// Rentable places, removed with their owner.
    places (id) {
        id -> Uuid,
        title -> Varchar,
        description -> Varchar,
        price -> Float8,
        latitude -> Float8,
        longitude -> Float8,
        owner_id -> Uuid,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        /// Insertion order; listings sort on it.
        creation_seq -> Int8,
    }
}

diesel::table! {
    /// Reviews, one per (user, place) pair, removed with either parent.
    reviews (id) {
        id -> Uuid,
        text -> Varchar,
        rating -> Int4,
        user_id -> Uuid,
        place_id -> Uuid,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        /// Insertion order; listings sort on it.
        creation_seq -> Int8,
    }
}

diesel::table! {
    /// Place to amenity links. `position` keeps the order links were given.
    place_amenity (place_id, amenity_id) {
        place_id -> Uuid,
        amenity_id -> Uuid,
        position -> Int4,
    }
}

diesel::joinable!(places -> users (owner_id));
diesel::joinable!(reviews -> places (place_id));
diesel::joinable!(reviews -> users (user_id));
diesel::joinable!(place_amenity -> places (place_id));
diesel::joinable!(place_amenity -> amenities (amenity_id));

diesel::allow_tables_to_appear_in_same_query!(users, amenities, places, reviews, place_amenity);
