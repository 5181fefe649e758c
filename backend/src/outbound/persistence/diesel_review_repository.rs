//! PostgreSQL-backed `ReviewRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RepositoryError, ReviewRepository};
use crate::domain::{PlaceId, Review, ReviewId, UserId};

use super::error_mapping::{map_diesel_error, map_pool_error, map_row_error};
use super::models::{ReviewRecord, ReviewRow};
use super::pool::DbPool;
use super::schema::reviews;

/// Diesel-backed implementation of the `ReviewRepository` port.
#[derive(Clone)]
pub struct DieselReviewRepository {
    pool: DbPool,
}

impl DieselReviewRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_review(row: ReviewRow) -> Result<Review, RepositoryError> {
    Review::try_from(row).map_err(map_row_error)
}

#[async_trait]
impl ReviewRepository for DieselReviewRepository {
    async fn create(&self, review: &Review) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(reviews::table)
            .values(&ReviewRecord::from(review))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &ReviewId) -> Result<Option<Review>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ReviewRow> = reviews::table
            .filter(reviews::id.eq(id.as_uuid()))
            .select(ReviewRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(to_review).transpose()
    }

    async fn list(&self) -> Result<Vec<Review>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ReviewRow> = reviews::table
            .select(ReviewRow::as_select())
            .order_by(reviews::creation_seq.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(to_review).collect()
    }

    async fn list_by_place(&self, place_id: &PlaceId) -> Result<Vec<Review>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ReviewRow> = reviews::table
            .filter(reviews::place_id.eq(place_id.as_uuid()))
            .select(ReviewRow::as_select())
            .order_by(reviews::creation_seq.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(to_review).collect()
    }

    async fn find_by_author_and_place(
        &self,
        user_id: &UserId,
        place_id: &PlaceId,
    ) -> Result<Option<Review>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ReviewRow> = reviews::table
            .filter(reviews::user_id.eq(user_id.as_uuid()))
            .filter(reviews::place_id.eq(place_id.as_uuid()))
            .select(ReviewRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(to_review).transpose()
    }

    async fn update(&self, review: &Review) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(reviews::table.filter(reviews::id.eq(review.id().as_uuid())))
            .set(&ReviewRecord::from(review))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: &ReviewId) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(reviews::table.filter(reviews::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
