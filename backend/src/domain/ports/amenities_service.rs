//! Driving port for the amenity catalogue.

use async_trait::async_trait;

use crate::domain::{Amenity, AmenityId, Error};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AmenitiesService: Send + Sync {
    /// Create an amenity. Names are unique.
    async fn create_amenity(&self, name: String) -> Result<Amenity, Error>;

    async fn list_amenities(&self) -> Result<Vec<Amenity>, Error>;

    async fn get_amenity(&self, id: &AmenityId) -> Result<Amenity, Error>;

    async fn update_amenity(&self, id: &AmenityId, name: String) -> Result<Amenity, Error>;

    /// Delete an amenity and unlink it from every place.
    async fn delete_amenity(&self, id: &AmenityId) -> Result<(), Error>;
}
