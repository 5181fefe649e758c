//! Review operations.

use async_trait::async_trait;
use tracing::{debug, info};

use super::{
    HbnbFacade, already_reviewed, map_repository_error, review_not_found, validation_error,
};
use crate::domain::ports::{
    AmenityRepository, PlaceRepository, ReviewRepository, ReviewsService, UserRepository,
};
use crate::domain::{Error, PlaceId, Review, ReviewDraft, ReviewId, ReviewUpdate};

impl<U, P, A, R> HbnbFacade<U, P, A, R>
where
    R: ReviewRepository,
{
    async fn require_review(&self, id: &ReviewId) -> Result<Review, Error> {
        self.reviews
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(review_not_found)
    }
}

#[async_trait]
impl<U, P, A, R> ReviewsService for HbnbFacade<U, P, A, R>
where
    U: UserRepository,
    P: PlaceRepository,
    A: AmenityRepository,
    R: ReviewRepository,
{
    async fn create_review(&self, draft: ReviewDraft) -> Result<Review, Error> {
        let review =
            Review::create(draft, self.now()).map_err(|err| validation_error(&err))?;
        self.require_user(review.user_id()).await?;
        self.require_place(review.place_id()).await?;
        let existing = self
            .reviews
            .find_by_author_and_place(review.user_id(), review.place_id())
            .await
            .map_err(map_repository_error)?;
        if existing.is_some() {
            return Err(already_reviewed());
        }

        self.reviews
            .create(&review)
            .await
            .map_err(map_repository_error)?;
        info!(
            review_id = %review.id(),
            place_id = %review.place_id(),
            "review created"
        );
        Ok(review)
    }

    async fn list_reviews(&self) -> Result<Vec<Review>, Error> {
        self.reviews.list().await.map_err(map_repository_error)
    }

    async fn get_review(&self, id: &ReviewId) -> Result<Review, Error> {
        self.require_review(id).await
    }

    async fn update_review(&self, id: &ReviewId, update: ReviewUpdate) -> Result<Review, Error> {
        let mut review = self.require_review(id).await?;
        review
            .apply(update, self.now())
            .map_err(|err| validation_error(&err))?;

        let updated = self
            .reviews
            .update(&review)
            .await
            .map_err(map_repository_error)?;
        if !updated {
            return Err(review_not_found());
        }
        debug!(review_id = %id, "review updated");
        Ok(review)
    }

    async fn delete_review(&self, id: &ReviewId) -> Result<(), Error> {
        let removed = self
            .reviews
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            return Err(review_not_found());
        }
        info!(review_id = %id, "review deleted");
        Ok(())
    }

    async fn list_reviews_for_place(&self, place_id: &PlaceId) -> Result<Vec<Review>, Error> {
        self.reviews
            .list_by_place(place_id)
            .await
            .map_err(map_repository_error)
    }
}
