//! PostgreSQL-backed `AmenityRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AmenityRepository, RepositoryError};
use crate::domain::{Amenity, AmenityId};

use super::error_mapping::{map_diesel_error, map_pool_error, map_row_error};
use super::models::{AmenityRecord, AmenityRow};
use super::pool::DbPool;
use super::schema::amenities;

/// Diesel-backed implementation of the `AmenityRepository` port.
#[derive(Clone)]
pub struct DieselAmenityRepository {
    pool: DbPool,
}

impl DieselAmenityRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_amenity(row: AmenityRow) -> Result<Amenity, RepositoryError> {
    Amenity::try_from(row).map_err(map_row_error)
}

#[async_trait]
impl AmenityRepository for DieselAmenityRepository {
    async fn create(&self, amenity: &Amenity) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(amenities::table)
            .values(&AmenityRecord::from(amenity))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &AmenityId) -> Result<Option<Amenity>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<AmenityRow> = amenities::table
            .filter(amenities::id.eq(id.as_uuid()))
            .select(AmenityRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(to_amenity).transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Amenity>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<AmenityRow> = amenities::table
            .filter(amenities::name.eq(name))
            .select(AmenityRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(to_amenity).transpose()
    }

    async fn list(&self) -> Result<Vec<Amenity>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<AmenityRow> = amenities::table
            .select(AmenityRow::as_select())
            .order_by(amenities::creation_seq.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(to_amenity).collect()
    }

    async fn update(&self, amenity: &Amenity) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated =
            diesel::update(amenities::table.filter(amenities::id.eq(amenity.id().as_uuid())))
                .set(&AmenityRecord::from(amenity))
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: &AmenityId) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(amenities::table.filter(amenities::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
