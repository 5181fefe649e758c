//! Port abstraction for user persistence adapters.
use async_trait::async_trait;

use crate::domain::{Email, User, UserId};

use super::RepositoryError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user record.
    async fn create(&self, user: &User) -> Result<(), RepositoryError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;

    /// Fetch a user by normalised email address.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError>;

    /// All users in creation order.
    async fn list(&self) -> Result<Vec<User>, RepositoryError>;

    /// Overwrite a stored user. Returns `false` when no row matched.
    async fn update(&self, user: &User) -> Result<bool, RepositoryError>;

    /// Remove a user along with the places and reviews that depend on it.
    /// Returns `false` when no row matched.
    async fn delete(&self, id: &UserId) -> Result<bool, RepositoryError>;
}
