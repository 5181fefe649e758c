//! Driving port for user management.
//!
//! Inbound adapters (HTTP handlers) call this port; they never reach the
//! repositories directly.

use async_trait::async_trait;

use crate::domain::{Error, User, UserDraft, UserId, UserUpdate};

/// Request to register a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    pub draft: UserDraft,
    /// Plaintext password; users may be registered without one.
    pub password: Option<String>,
}

/// Request to change a user's attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateUserRequest {
    pub changes: UserUpdate,
    /// New plaintext password, if the caller is rotating it.
    pub password: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Register a user. Fails with `Conflict` when the email is taken.
    async fn create_user(&self, request: CreateUserRequest) -> Result<User, Error>;

    async fn list_users(&self) -> Result<Vec<User>, Error>;

    async fn get_user(&self, id: &UserId) -> Result<User, Error>;

    async fn update_user(&self, id: &UserId, request: UpdateUserRequest) -> Result<User, Error>;

    /// Delete a user together with their places and reviews.
    async fn delete_user(&self, id: &UserId) -> Result<(), Error>;
}
