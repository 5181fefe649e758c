//! In-process store implementing every repository port.
//!
//! Used when no database is configured and by tests. A single mutex guards
//! all four tables so each call sees and leaves a consistent snapshot. The
//! store enforces the same unique keys, foreign keys and cascades as the
//! PostgreSQL schema and reports violations with the same constraint names.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    AmenityRepository, PlaceRepository, RepositoryError, ReviewRepository, UserRepository,
    constraints,
};
use crate::domain::{
    Amenity, AmenityId, Email, Place, PlaceId, Review, ReviewId, User, UserId,
};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    places: Vec<Place>,
    amenities: Vec<Amenity>,
    reviews: Vec<Review>,
}

impl Tables {
    fn user_exists(&self, id: &UserId) -> bool {
        self.users.iter().any(|user| user.id() == id)
    }

    fn place_exists(&self, id: &PlaceId) -> bool {
        self.places.iter().any(|place| place.id() == id)
    }

    fn check_place_references(&self, place: &Place) -> Result<(), RepositoryError> {
        if !self.user_exists(place.owner_id()) {
            return Err(RepositoryError::missing_reference(
                constraints::PLACES_OWNER_FKEY,
            ));
        }
        let dangling = place
            .amenity_ids()
            .iter()
            .any(|id| !self.amenities.iter().any(|amenity| amenity.id() == id));
        if dangling {
            return Err(RepositoryError::missing_reference(
                constraints::PLACE_AMENITY_AMENITY_FKEY,
            ));
        }
        Ok(())
    }
}

/// Mutex-guarded tables for users, places, amenities and reviews.
///
/// Share one store between the four ports with `Arc`:
///
/// ```
/// use std::sync::Arc;
/// use hbnb::outbound::memory::MemoryStore;
///
/// let store = Arc::new(MemoryStore::default());
/// let users = Arc::clone(&store);
/// let places = Arc::clone(&store);
/// # let _ = (users, places);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    fn lock(&self) -> Result<MutexGuard<'_, Tables>, RepositoryError> {
        self.tables
            .lock()
            .map_err(|_| RepositoryError::query("memory store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: &User) -> Result<(), RepositoryError> {
        let mut tables = self.lock()?;
        if tables.user_exists(user.id()) {
            return Err(RepositoryError::duplicate("users_pkey"));
        }
        if tables.users.iter().any(|u| u.email() == user.email()) {
            return Err(RepositoryError::duplicate(constraints::USERS_EMAIL_KEY));
        }
        tables.users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let tables = self.lock()?;
        Ok(tables.users.iter().find(|user| user.id() == id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let tables = self.lock()?;
        Ok(tables.users.iter().find(|user| user.email() == email).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self.lock()?.users.clone())
    }

    async fn update(&self, user: &User) -> Result<bool, RepositoryError> {
        let mut tables = self.lock()?;
        let email_clash = tables
            .users
            .iter()
            .any(|u| u.id() != user.id() && u.email() == user.email());
        if email_clash {
            return Err(RepositoryError::duplicate(constraints::USERS_EMAIL_KEY));
        }
        match tables.users.iter_mut().find(|u| u.id() == user.id()) {
            Some(slot) => {
                *slot = user.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &UserId) -> Result<bool, RepositoryError> {
        let mut tables = self.lock()?;
        let before = tables.users.len();
        tables.users.retain(|user| user.id() != id);
        if tables.users.len() == before {
            return Ok(false);
        }
        let owned: Vec<PlaceId> = tables
            .places
            .iter()
            .filter(|place| place.owner_id() == id)
            .map(|place| place.id().clone())
            .collect();
        tables
            .reviews
            .retain(|review| review.user_id() != id && !owned.contains(review.place_id()));
        tables.places.retain(|place| place.owner_id() != id);
        Ok(true)
    }
}

#[async_trait]
impl AmenityRepository for MemoryStore {
    async fn create(&self, amenity: &Amenity) -> Result<(), RepositoryError> {
        let mut tables = self.lock()?;
        if tables.amenities.iter().any(|a| a.id() == amenity.id()) {
            return Err(RepositoryError::duplicate("amenities_pkey"));
        }
        if tables.amenities.iter().any(|a| a.name() == amenity.name()) {
            return Err(RepositoryError::duplicate(constraints::AMENITIES_NAME_KEY));
        }
        tables.amenities.push(amenity.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &AmenityId) -> Result<Option<Amenity>, RepositoryError> {
        let tables = self.lock()?;
        Ok(tables.amenities.iter().find(|a| a.id() == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Amenity>, RepositoryError> {
        let tables = self.lock()?;
        Ok(tables.amenities.iter().find(|a| a.name() == name).cloned())
    }

    async fn list(&self) -> Result<Vec<Amenity>, RepositoryError> {
        Ok(self.lock()?.amenities.clone())
    }

    async fn update(&self, amenity: &Amenity) -> Result<bool, RepositoryError> {
        let mut tables = self.lock()?;
        let name_clash = tables
            .amenities
            .iter()
            .any(|a| a.id() != amenity.id() && a.name() == amenity.name());
        if name_clash {
            return Err(RepositoryError::duplicate(constraints::AMENITIES_NAME_KEY));
        }
        match tables.amenities.iter_mut().find(|a| a.id() == amenity.id()) {
            Some(slot) => {
                *slot = amenity.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &AmenityId) -> Result<bool, RepositoryError> {
        let mut tables = self.lock()?;
        let before = tables.amenities.len();
        tables.amenities.retain(|a| a.id() != id);
        if tables.amenities.len() == before {
            return Ok(false);
        }
        for place in &mut tables.places {
            place.unlink_amenity(id);
        }
        Ok(true)
    }
}

#[async_trait]
impl PlaceRepository for MemoryStore {
    async fn create(&self, place: &Place) -> Result<(), RepositoryError> {
        let mut tables = self.lock()?;
        if tables.place_exists(place.id()) {
            return Err(RepositoryError::duplicate("places_pkey"));
        }
        tables.check_place_references(place)?;
        tables.places.push(place.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &PlaceId) -> Result<Option<Place>, RepositoryError> {
        let tables = self.lock()?;
        Ok(tables.places.iter().find(|place| place.id() == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Place>, RepositoryError> {
        Ok(self.lock()?.places.clone())
    }

    async fn update(&self, place: &Place) -> Result<bool, RepositoryError> {
        let mut tables = self.lock()?;
        if !tables.place_exists(place.id()) {
            return Ok(false);
        }
        tables.check_place_references(place)?;
        if let Some(slot) = tables.places.iter_mut().find(|p| p.id() == place.id()) {
            *slot = place.clone();
        }
        Ok(true)
    }

    async fn delete(&self, id: &PlaceId) -> Result<bool, RepositoryError> {
        let mut tables = self.lock()?;
        let before = tables.places.len();
        tables.places.retain(|place| place.id() != id);
        if tables.places.len() == before {
            return Ok(false);
        }
        tables.reviews.retain(|review| review.place_id() != id);
        Ok(true)
    }
}

#[async_trait]
impl ReviewRepository for MemoryStore {
    async fn create(&self, review: &Review) -> Result<(), RepositoryError> {
        let mut tables = self.lock()?;
        if tables.reviews.iter().any(|r| r.id() == review.id()) {
            return Err(RepositoryError::duplicate("reviews_pkey"));
        }
        if !tables.user_exists(review.user_id()) {
            return Err(RepositoryError::missing_reference(
                constraints::REVIEWS_USER_FKEY,
            ));
        }
        if !tables.place_exists(review.place_id()) {
            return Err(RepositoryError::missing_reference(
                constraints::REVIEWS_PLACE_FKEY,
            ));
        }
        let repeat = tables
            .reviews
            .iter()
            .any(|r| r.user_id() == review.user_id() && r.place_id() == review.place_id());
        if repeat {
            return Err(RepositoryError::duplicate(
                constraints::REVIEWS_USER_PLACE_KEY,
            ));
        }
        tables.reviews.push(review.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ReviewId) -> Result<Option<Review>, RepositoryError> {
        let tables = self.lock()?;
        Ok(tables.reviews.iter().find(|r| r.id() == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Review>, RepositoryError> {
        Ok(self.lock()?.reviews.clone())
    }

    async fn list_by_place(&self, place_id: &PlaceId) -> Result<Vec<Review>, RepositoryError> {
        let tables = self.lock()?;
        Ok(tables
            .reviews
            .iter()
            .filter(|r| r.place_id() == place_id)
            .cloned()
            .collect())
    }

    async fn find_by_author_and_place(
        &self,
        user_id: &UserId,
        place_id: &PlaceId,
    ) -> Result<Option<Review>, RepositoryError> {
        let tables = self.lock()?;
        Ok(tables
            .reviews
            .iter()
            .find(|r| r.user_id() == user_id && r.place_id() == place_id)
            .cloned())
    }

    async fn update(&self, review: &Review) -> Result<bool, RepositoryError> {
        let mut tables = self.lock()?;
        match tables.reviews.iter_mut().find(|r| r.id() == review.id()) {
            Some(slot) => {
                *slot = review.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &ReviewId) -> Result<bool, RepositoryError> {
        let mut tables = self.lock()?;
        let before = tables.reviews.len();
        tables.reviews.retain(|r| r.id() != id);
        Ok(tables.reviews.len() != before)
    }
}

#[cfg(test)]
mod tests;
