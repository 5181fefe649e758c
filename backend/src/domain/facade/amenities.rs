//! Amenity operations.

use async_trait::async_trait;
use tracing::{debug, info};

use super::{
    HbnbFacade, amenity_name_taken, amenity_not_found, map_repository_error, validation_error,
};
use crate::domain::ports::{
    AmenitiesService, AmenityRepository, PlaceRepository, ReviewRepository, UserRepository,
};
use crate::domain::{Amenity, AmenityId, Error};

impl<U, P, A, R> HbnbFacade<U, P, A, R>
where
    A: AmenityRepository,
{
    pub(super) async fn require_amenity(&self, id: &AmenityId) -> Result<Amenity, Error> {
        self.amenities
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(amenity_not_found)
    }

    async fn ensure_name_free(&self, name: &str, except: Option<&AmenityId>) -> Result<(), Error> {
        let holder = self
            .amenities
            .find_by_name(name)
            .await
            .map_err(map_repository_error)?;
        match holder {
            Some(existing) if Some(existing.id()) != except => Err(amenity_name_taken()),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<U, P, A, R> AmenitiesService for HbnbFacade<U, P, A, R>
where
    U: UserRepository,
    P: PlaceRepository,
    A: AmenityRepository,
    R: ReviewRepository,
{
    async fn create_amenity(&self, name: String) -> Result<Amenity, Error> {
        let amenity =
            Amenity::create(name, self.now()).map_err(|err| validation_error(&err))?;
        self.ensure_name_free(amenity.name(), None).await?;

        self.amenities
            .create(&amenity)
            .await
            .map_err(map_repository_error)?;
        info!(amenity_id = %amenity.id(), "amenity created");
        Ok(amenity)
    }

    async fn list_amenities(&self) -> Result<Vec<Amenity>, Error> {
        self.amenities.list().await.map_err(map_repository_error)
    }

    async fn get_amenity(&self, id: &AmenityId) -> Result<Amenity, Error> {
        self.require_amenity(id).await
    }

    async fn update_amenity(&self, id: &AmenityId, name: String) -> Result<Amenity, Error> {
        let mut amenity = self.require_amenity(id).await?;
        amenity
            .rename(name, self.now())
            .map_err(|err| validation_error(&err))?;
        self.ensure_name_free(amenity.name(), Some(id)).await?;

        let updated = self
            .amenities
            .update(&amenity)
            .await
            .map_err(map_repository_error)?;
        if !updated {
            return Err(amenity_not_found());
        }
        debug!(amenity_id = %id, "amenity updated");
        Ok(amenity)
    }

    async fn delete_amenity(&self, id: &AmenityId) -> Result<(), Error> {
        let removed = self
            .amenities
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            return Err(amenity_not_found());
        }
        info!(amenity_id = %id, "amenity deleted");
        Ok(())
    }
}
