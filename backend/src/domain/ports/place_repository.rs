//! Port abstraction for place persistence adapters.
//!
//! A place and its amenity links form one aggregate: adapters write both in
//! a single transaction, so a failed write leaves neither behind.
use async_trait::async_trait;

use crate::domain::{Place, PlaceId};

use super::RepositoryError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlaceRepository: Send + Sync {
    /// Insert a place and its amenity links.
    async fn create(&self, place: &Place) -> Result<(), RepositoryError>;

    /// Fetch a place, amenity links included.
    async fn find_by_id(&self, id: &PlaceId) -> Result<Option<Place>, RepositoryError>;

    /// All places in creation order.
    async fn list(&self) -> Result<Vec<Place>, RepositoryError>;

    /// Overwrite a place and replace its amenity links. Returns `false` when
    /// no row matched.
    async fn update(&self, place: &Place) -> Result<bool, RepositoryError>;

    /// Remove a place, its reviews and its amenity links.
    async fn delete(&self, id: &PlaceId) -> Result<bool, RepositoryError>;
}
