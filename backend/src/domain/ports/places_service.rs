//! Driving port for place listings.

use async_trait::async_trait;

use crate::domain::{Amenity, Error, Place, PlaceDraft, PlaceId, PlaceUpdate, User};

/// A place together with the records it references.
#[derive(Debug, Clone)]
pub struct PlaceDetails {
    pub place: Place,
    pub owner: User,
    /// Linked amenities in link order.
    pub amenities: Vec<Amenity>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlacesService: Send + Sync {
    /// List a place. The owner and every amenity must exist.
    async fn create_place(&self, draft: PlaceDraft) -> Result<Place, Error>;

    async fn list_places(&self) -> Result<Vec<Place>, Error>;

    async fn get_place(&self, id: &PlaceId) -> Result<PlaceDetails, Error>;

    async fn update_place(&self, id: &PlaceId, update: PlaceUpdate) -> Result<Place, Error>;

    /// Delete a place along with its reviews and amenity links.
    async fn delete_place(&self, id: &PlaceId) -> Result<(), Error>;
}
