//! Port abstraction for amenity persistence adapters.
use async_trait::async_trait;

use crate::domain::{Amenity, AmenityId};

use super::RepositoryError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AmenityRepository: Send + Sync {
    /// Insert a new amenity record.
    async fn create(&self, amenity: &Amenity) -> Result<(), RepositoryError>;

    /// Fetch an amenity by identifier.
    async fn find_by_id(&self, id: &AmenityId) -> Result<Option<Amenity>, RepositoryError>;

    /// Fetch an amenity by its exact name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Amenity>, RepositoryError>;

    /// All amenities in creation order.
    async fn list(&self) -> Result<Vec<Amenity>, RepositoryError>;

    /// Overwrite a stored amenity. Returns `false` when no row matched.
    async fn update(&self, amenity: &Amenity) -> Result<bool, RepositoryError>;

    /// Remove an amenity and every place link to it.
    async fn delete(&self, id: &AmenityId) -> Result<bool, RepositoryError>;
}
