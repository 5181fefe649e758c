//! Outbound adapters implementing the repository ports.
//!
//! - **memory**: a mutex-guarded in-process store, used when no database is
//!   configured and throughout the tests
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//!
//! Adapters translate between domain records and storage representations.
//! They contain no business rules.

pub mod memory;
pub mod persistence;
