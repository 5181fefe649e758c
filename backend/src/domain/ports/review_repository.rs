//! Port abstraction for review persistence adapters.
use async_trait::async_trait;

use crate::domain::{PlaceId, Review, ReviewId, UserId};

use super::RepositoryError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Insert a new review record.
    async fn create(&self, review: &Review) -> Result<(), RepositoryError>;

    /// Fetch a review by identifier.
    async fn find_by_id(&self, id: &ReviewId) -> Result<Option<Review>, RepositoryError>;

    /// All reviews in creation order.
    async fn list(&self) -> Result<Vec<Review>, RepositoryError>;

    /// Reviews of one place in creation order.
    async fn list_by_place(&self, place_id: &PlaceId) -> Result<Vec<Review>, RepositoryError>;

    /// The review `user_id` wrote for `place_id`, if any.
    async fn find_by_author_and_place(
        &self,
        user_id: &UserId,
        place_id: &PlaceId,
    ) -> Result<Option<Review>, RepositoryError>;

    /// Overwrite a stored review. Returns `false` when no row matched.
    async fn update(&self, review: &Review) -> Result<bool, RepositoryError>;

    /// Remove a review. Returns `false` when no row matched.
    async fn delete(&self, id: &ReviewId) -> Result<bool, RepositoryError>;
}
