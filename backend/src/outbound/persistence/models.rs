//! Diesel row structs and their conversions to domain records.
//!
//! Rows are internal to the persistence adapter. Stored values are
//! revalidated on the way out so a row edited behind the application's back
//! surfaces as a query error rather than an invalid domain value.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Amenity, AmenityId, HashedPassword, Place, PlaceId, PlaceState, Review, ReviewId, ReviewState,
    User, UserId, UserState,
};

use super::schema::{amenities, place_amenity, places, reviews, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full column set written on insert and update.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct UserRecord<'a> {
    pub id: Uuid,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub password_hash: Option<&'a str>,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a User> for UserRecord<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: *user.id().as_uuid(),
            first_name: user.first_name(),
            last_name: user.last_name(),
            email: user.email().as_ref(),
            password_hash: user.password().map(HashedPassword::as_phc),
            is_admin: user.is_admin(),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        }
    }
}

impl TryFrom<UserRow> for User {
    type Error = String;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let password = row
            .password_hash
            .map(HashedPassword::from_phc)
            .transpose()
            .map_err(|err| format!("user {}: {err}", row.id))?;
        User::restore(UserState {
            id: UserId::from_uuid(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            password,
            is_admin: row.is_admin,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
        .map_err(|err| format!("user {}: {err}", row.id))
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = amenities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AmenityRow {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = amenities)]
pub(crate) struct AmenityRecord<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a Amenity> for AmenityRecord<'a> {
    fn from(amenity: &'a Amenity) -> Self {
        Self {
            id: *amenity.id().as_uuid(),
            name: amenity.name(),
            created_at: amenity.created_at(),
            updated_at: amenity.updated_at(),
        }
    }
}

impl TryFrom<AmenityRow> for Amenity {
    type Error = String;

    fn try_from(row: AmenityRow) -> Result<Self, Self::Error> {
        Amenity::restore(
            AmenityId::from_uuid(row.id),
            row.name,
            row.created_at,
            row.updated_at,
        )
        .map_err(|err| format!("amenity {}: {err}", row.id))
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = places)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PlaceRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = places)]
pub(crate) struct PlaceRecord<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub description: &'a str,
    pub price: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a Place> for PlaceRecord<'a> {
    fn from(place: &'a Place) -> Self {
        Self {
            id: *place.id().as_uuid(),
            title: place.title(),
            description: place.description(),
            price: place.price(),
            latitude: place.latitude(),
            longitude: place.longitude(),
            owner_id: *place.owner_id().as_uuid(),
            created_at: place.created_at(),
            updated_at: place.updated_at(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = place_amenity)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PlaceAmenityRow {
    pub place_id: Uuid,
    pub amenity_id: Uuid,
    pub position: i32,
}

/// Link rows for a place, numbered in link order.
pub(crate) fn link_rows(place: &Place) -> Vec<PlaceAmenityRow> {
    let place_id = *place.id().as_uuid();
    place
        .amenity_ids()
        .iter()
        .zip(0_i32..)
        .map(|(amenity_id, position)| PlaceAmenityRow {
            place_id,
            amenity_id: *amenity_id.as_uuid(),
            position,
        })
        .collect()
}

/// Rebuild a place from its row and its links, already sorted by position.
pub(crate) fn place_from_rows(row: PlaceRow, links: &[PlaceAmenityRow]) -> Result<Place, String> {
    Place::restore(PlaceState {
        id: PlaceId::from_uuid(row.id),
        title: row.title,
        description: row.description,
        price: row.price,
        latitude: row.latitude,
        longitude: row.longitude,
        owner_id: UserId::from_uuid(row.owner_id),
        amenity_ids: links
            .iter()
            .map(|link| AmenityId::from_uuid(link.amenity_id))
            .collect(),
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
    .map_err(|err| format!("place {}: {err}", row.id))
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = reviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ReviewRow {
    pub id: Uuid,
    pub text: String,
    pub rating: i32,
    pub user_id: Uuid,
    pub place_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = reviews)]
pub(crate) struct ReviewRecord<'a> {
    pub id: Uuid,
    pub text: &'a str,
    pub rating: i32,
    pub user_id: Uuid,
    pub place_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a Review> for ReviewRecord<'a> {
    fn from(review: &'a Review) -> Self {
        Self {
            id: *review.id().as_uuid(),
            text: review.text(),
            rating: i32::from(review.rating().get()),
            user_id: *review.user_id().as_uuid(),
            place_id: *review.place_id().as_uuid(),
            created_at: review.created_at(),
            updated_at: review.updated_at(),
        }
    }
}

impl TryFrom<ReviewRow> for Review {
    type Error = String;

    fn try_from(row: ReviewRow) -> Result<Self, Self::Error> {
        Review::restore(ReviewState {
            id: ReviewId::from_uuid(row.id),
            text: row.text,
            rating: i64::from(row.rating),
            user_id: UserId::from_uuid(row.user_id),
            place_id: PlaceId::from_uuid(row.place_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
        .map_err(|err| format!("review {}: {err}", row.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PlaceDraft, ReviewDraft};
    use rstest::rstest;

    fn sample_place(amenities: Vec<AmenityId>) -> Place {
        Place::create(
            PlaceDraft {
                title: "Studio".to_owned(),
                description: String::new(),
                price: 55.0,
                latitude: 1.0,
                longitude: 2.0,
                owner_id: UserId::random(),
                amenity_ids: amenities,
            },
            Utc::now(),
        )
        .expect("valid place")
    }

    #[rstest]
    fn link_rows_number_amenities_in_order() {
        let ids = vec![AmenityId::random(), AmenityId::random()];
        let place = sample_place(ids.clone());
        let rows = link_rows(&place);
        let positions: Vec<i32> = rows.iter().map(|row| row.position).collect();
        assert_eq!(positions, [0, 1]);
        assert_eq!(rows[1].amenity_id, *ids[1].as_uuid());
    }

    #[rstest]
    fn place_survives_row_round_trip() {
        let place = sample_place(vec![AmenityId::random()]);
        let record = PlaceRecord::from(&place);
        let row = PlaceRow {
            id: record.id,
            title: record.title.to_owned(),
            description: record.description.to_owned(),
            price: record.price,
            latitude: record.latitude,
            longitude: record.longitude,
            owner_id: record.owner_id,
            created_at: record.created_at,
            updated_at: record.updated_at,
        };
        let restored = place_from_rows(row, &link_rows(&place)).expect("valid row");
        assert_eq!(restored, place);
    }

    #[rstest]
    fn out_of_range_rating_row_is_rejected() {
        let review = Review::create(
            ReviewDraft {
                text: "ok".to_owned(),
                rating: 3,
                user_id: UserId::random(),
                place_id: PlaceId::random(),
            },
            Utc::now(),
        )
        .expect("valid review");
        let record = ReviewRecord::from(&review);
        let row = ReviewRow {
            id: record.id,
            text: record.text.to_owned(),
            rating: 9,
            user_id: record.user_id,
            place_id: record.place_id,
            created_at: record.created_at,
            updated_at: record.updated_at,
        };
        let err = Review::try_from(row).expect_err("rating out of range");
        assert!(err.contains("rating must be between 1 and 5"));
    }
}
