//! Driving port for reviews.

use async_trait::async_trait;

use crate::domain::{Error, PlaceId, Review, ReviewDraft, ReviewId, ReviewUpdate};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewsService: Send + Sync {
    /// Post a review. Author and place must exist; a user reviews a place at
    /// most once.
    async fn create_review(&self, draft: ReviewDraft) -> Result<Review, Error>;

    async fn list_reviews(&self) -> Result<Vec<Review>, Error>;

    async fn get_review(&self, id: &ReviewId) -> Result<Review, Error>;

    /// Change the text or rating of a review.
    async fn update_review(&self, id: &ReviewId, update: ReviewUpdate) -> Result<Review, Error>;

    async fn delete_review(&self, id: &ReviewId) -> Result<(), Error>;

    /// Reviews of one place in creation order. An unknown place yields an
    /// empty list.
    async fn list_reviews_for_place(&self, place_id: &PlaceId) -> Result<Vec<Review>, Error>;
}
