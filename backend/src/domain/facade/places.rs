//! Place operations.

use async_trait::async_trait;
use tracing::{debug, info};

use super::{HbnbFacade, map_repository_error, owner_not_found, place_not_found, validation_error};
use crate::domain::ports::{
    AmenityRepository, PlaceDetails, PlaceRepository, PlacesService, ReviewRepository,
    UserRepository,
};
use crate::domain::{AmenityId, Error, Place, PlaceDraft, PlaceId, PlaceUpdate, UserId};

impl<U, P, A, R> HbnbFacade<U, P, A, R>
where
    U: UserRepository,
    P: PlaceRepository,
    A: AmenityRepository,
{
    pub(super) async fn require_place(&self, id: &PlaceId) -> Result<Place, Error> {
        self.places
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(place_not_found)
    }

    async fn ensure_owner_exists(&self, owner_id: &UserId) -> Result<(), Error> {
        self.users
            .find_by_id(owner_id)
            .await
            .map_err(map_repository_error)?
            .map(|_| ())
            .ok_or_else(owner_not_found)
    }

    async fn ensure_amenities_exist(&self, ids: &[AmenityId]) -> Result<(), Error> {
        for id in ids {
            self.require_amenity(id).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl<U, P, A, R> PlacesService for HbnbFacade<U, P, A, R>
where
    U: UserRepository,
    P: PlaceRepository,
    A: AmenityRepository,
    R: ReviewRepository,
{
    async fn create_place(&self, draft: PlaceDraft) -> Result<Place, Error> {
        let place = Place::create(draft, self.now()).map_err(|err| validation_error(&err))?;
        self.ensure_owner_exists(place.owner_id()).await?;
        self.ensure_amenities_exist(place.amenity_ids()).await?;

        self.places
            .create(&place)
            .await
            .map_err(map_repository_error)?;
        info!(place_id = %place.id(), owner_id = %place.owner_id(), "place created");
        Ok(place)
    }

    async fn list_places(&self) -> Result<Vec<Place>, Error> {
        self.places.list().await.map_err(map_repository_error)
    }

    async fn get_place(&self, id: &PlaceId) -> Result<PlaceDetails, Error> {
        let place = self.require_place(id).await?;
        let owner = self
            .users
            .find_by_id(place.owner_id())
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::internal(format!("owner of place {id} is missing")))?;
        let mut amenities = Vec::with_capacity(place.amenity_ids().len());
        for amenity_id in place.amenity_ids() {
            // A link can outlive its amenity only across a concurrent delete.
            if let Some(amenity) = self
                .amenities
                .find_by_id(amenity_id)
                .await
                .map_err(map_repository_error)?
            {
                amenities.push(amenity);
            }
        }
        Ok(PlaceDetails {
            place,
            owner,
            amenities,
        })
    }

    async fn update_place(&self, id: &PlaceId, update: PlaceUpdate) -> Result<Place, Error> {
        let mut place = self.require_place(id).await?;
        let owner_changed = update.owner_id.is_some();
        let amenities_changed = update.amenity_ids.is_some();
        place
            .apply(update, self.now())
            .map_err(|err| validation_error(&err))?;
        if owner_changed {
            self.ensure_owner_exists(place.owner_id()).await?;
        }
        if amenities_changed {
            self.ensure_amenities_exist(place.amenity_ids()).await?;
        }

        let updated = self
            .places
            .update(&place)
            .await
            .map_err(map_repository_error)?;
        if !updated {
            return Err(place_not_found());
        }
        debug!(place_id = %id, "place updated");
        Ok(place)
    }

    async fn delete_place(&self, id: &PlaceId) -> Result<(), Error> {
        let removed = self
            .places
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            return Err(place_not_found());
        }
        info!(place_id = %id, "place deleted");
        Ok(())
    }
}
