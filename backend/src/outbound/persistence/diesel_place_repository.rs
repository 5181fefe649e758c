//! PostgreSQL-backed `PlaceRepository` implementation using Diesel ORM.
//!
//! The place row and its `place_amenity` links are written in one
//! transaction; updates replace the whole link set.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{PlaceRepository, RepositoryError};
use crate::domain::{Place, PlaceId};

use super::error_mapping::{map_diesel_error, map_pool_error, map_row_error};
use super::models::{PlaceAmenityRow, PlaceRecord, PlaceRow, link_rows, place_from_rows};
use super::pool::DbPool;
use super::schema::{place_amenity, places};

/// Diesel-backed implementation of the `PlaceRepository` port.
#[derive(Clone)]
pub struct DieselPlaceRepository {
    pool: DbPool,
}

impl DieselPlaceRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Attach links to their places, keeping the order of `rows`.
fn assemble(
    rows: Vec<PlaceRow>,
    links: Vec<PlaceAmenityRow>,
) -> Result<Vec<Place>, RepositoryError> {
    let mut by_place: HashMap<Uuid, Vec<PlaceAmenityRow>> = HashMap::new();
    for link in links {
        by_place.entry(link.place_id).or_default().push(link);
    }
    rows.into_iter()
        .map(|row| {
            let links = by_place.remove(&row.id).unwrap_or_default();
            place_from_rows(row, &links).map_err(map_row_error)
        })
        .collect()
}

#[async_trait]
impl PlaceRepository for DieselPlaceRepository {
    async fn create(&self, place: &Place) -> Result<(), RepositoryError> {
        let record = PlaceRecord::from(place);
        let links = link_rows(place);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                diesel::insert_into(places::table)
                    .values(&record)
                    .execute(conn)
                    .await?;
                if !links.is_empty() {
                    diesel::insert_into(place_amenity::table)
                        .values(&links)
                        .execute(conn)
                        .await?;
                }
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &PlaceId) -> Result<Option<Place>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<PlaceRow> = places::table
            .filter(places::id.eq(id.as_uuid()))
            .select(PlaceRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        let Some(row) = row else {
            return Ok(None);
        };
        let links: Vec<PlaceAmenityRow> = place_amenity::table
            .filter(place_amenity::place_id.eq(id.as_uuid()))
            .select(PlaceAmenityRow::as_select())
            .order_by(place_amenity::position.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        place_from_rows(row, &links).map(Some).map_err(map_row_error)
    }

    async fn list(&self) -> Result<Vec<Place>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<PlaceRow> = places::table
            .select(PlaceRow::as_select())
            .order_by(places::creation_seq.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let links: Vec<PlaceAmenityRow> = place_amenity::table
            .select(PlaceAmenityRow::as_select())
            .order_by((place_amenity::place_id.asc(), place_amenity::position.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        assemble(rows, links)
    }

    async fn update(&self, place: &Place) -> Result<bool, RepositoryError> {
        let place_id = *place.id().as_uuid();
        let record = PlaceRecord::from(place);
        let links = link_rows(place);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                let updated = diesel::update(places::table.filter(places::id.eq(place_id)))
                    .set(&record)
                    .execute(conn)
                    .await?;
                if updated == 0 {
                    return Ok(false);
                }
                diesel::delete(place_amenity::table.filter(place_amenity::place_id.eq(place_id)))
                    .execute(conn)
                    .await?;
                if !links.is_empty() {
                    diesel::insert_into(place_amenity::table)
                        .values(&links)
                        .execute(conn)
                        .await?;
                }
                Ok(true)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn delete(&self, id: &PlaceId) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(places::table.filter(places::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
