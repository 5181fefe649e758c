//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the repository ports backed by PostgreSQL via
//! `diesel-async` and `bb8` connection pooling.
//!
//! - Repository implementations only translate between Diesel rows and
//!   domain records. Rules live in the facade.
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) never
//!   leave this module.
//! - Database failures are mapped to [`RepositoryError`] in one place
//!   (`error_mapping.rs`), keyed by constraint name.
//!
//! # Example
//!
//! ```ignore
//! use hbnb::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/hbnb")).await?;
//! let users = DieselUserRepository::new(pool);
//! ```
//!
//! [`RepositoryError`]: crate::domain::ports::RepositoryError

mod diesel_amenity_repository;
mod diesel_place_repository;
mod diesel_review_repository;
mod diesel_user_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_amenity_repository::DieselAmenityRepository;
pub use diesel_place_repository::DieselPlaceRepository;
pub use diesel_review_repository::DieselReviewRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::run_migrations;
pub use pool::{DbPool, PoolConfig, PoolError};
