//! Tests for the in-process store.

use super::*;
use chrono::Utc;
use rstest::{fixture, rstest};

use crate::domain::{PlaceDraft, ReviewDraft, UserDraft};

#[fixture]
fn store() -> MemoryStore {
    MemoryStore::default()
}

fn user(email: &str) -> User {
    User::create(
        UserDraft {
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            email: email.to_owned(),
            is_admin: false,
        },
        Utc::now(),
    )
    .expect("valid user")
}

fn place(owner: &User, amenities: Vec<AmenityId>) -> Place {
    Place::create(
        PlaceDraft {
            title: "Loft".to_owned(),
            description: String::new(),
            price: 90.0,
            latitude: 10.0,
            longitude: 20.0,
            owner_id: owner.id().clone(),
            amenity_ids: amenities,
        },
        Utc::now(),
    )
    .expect("valid place")
}

fn review(author: &User, place: &Place) -> Review {
    Review::create(
        ReviewDraft {
            text: "Lovely".to_owned(),
            rating: 5,
            user_id: author.id().clone(),
            place_id: place.id().clone(),
        },
        Utc::now(),
    )
    .expect("valid review")
}

#[rstest]
#[tokio::test]
async fn duplicate_email_is_reported_with_constraint_name(store: MemoryStore) {
    let users: &dyn UserRepository = &store;
    users.create(&user("a@x.com")).await.expect("first insert");

    let err = users
        .create(&user("a@x.com"))
        .await
        .expect_err("second insert");
    assert_eq!(
        err,
        RepositoryError::duplicate(constraints::USERS_EMAIL_KEY)
    );
    assert_eq!(users.list().await.expect("list").len(), 1);
}

#[rstest]
#[tokio::test]
async fn place_with_unknown_amenity_writes_nothing(store: MemoryStore) {
    let users: &dyn UserRepository = &store;
    let places: &dyn PlaceRepository = &store;
    let owner = user("owner@x.com");
    users.create(&owner).await.expect("owner");

    let err = places
        .create(&place(&owner, vec![AmenityId::random()]))
        .await
        .expect_err("dangling amenity");
    assert_eq!(
        err,
        RepositoryError::missing_reference(constraints::PLACE_AMENITY_AMENITY_FKEY)
    );
    assert!(places.list().await.expect("list").is_empty());
}

#[rstest]
#[tokio::test]
async fn deleting_user_cascades_to_places_and_reviews(store: MemoryStore) {
    let users: &dyn UserRepository = &store;
    let places: &dyn PlaceRepository = &store;
    let reviews: &dyn ReviewRepository = &store;

    let owner = user("owner@x.com");
    let guest = user("guest@x.com");
    users.create(&owner).await.expect("owner");
    users.create(&guest).await.expect("guest");
    let owned = place(&owner, Vec::new());
    let other = place(&guest, Vec::new());
    places.create(&owned).await.expect("owned place");
    places.create(&other).await.expect("other place");
    reviews
        .create(&review(&guest, &owned))
        .await
        .expect("guest review");
    reviews
        .create(&review(&owner, &other))
        .await
        .expect("owner review");

    assert!(users.delete(owner.id()).await.expect("delete"));

    let remaining_places = places.list().await.expect("places");
    assert_eq!(remaining_places.len(), 1);
    assert_eq!(remaining_places[0].id(), other.id());
    assert!(reviews.list().await.expect("reviews").is_empty());
}

#[rstest]
#[tokio::test]
async fn deleting_amenity_unlinks_it_from_places(store: MemoryStore) {
    let users: &dyn UserRepository = &store;
    let places: &dyn PlaceRepository = &store;
    let amenities: &dyn AmenityRepository = &store;

    let owner = user("owner@x.com");
    users.create(&owner).await.expect("owner");
    let wifi = Amenity::create("WiFi", Utc::now()).expect("amenity");
    let pool = Amenity::create("Pool", Utc::now()).expect("amenity");
    amenities.create(&wifi).await.expect("wifi");
    amenities.create(&pool).await.expect("pool");
    let listed = place(&owner, vec![wifi.id().clone(), pool.id().clone()]);
    places.create(&listed).await.expect("place");

    assert!(amenities.delete(wifi.id()).await.expect("delete"));

    let stored = places
        .find_by_id(listed.id())
        .await
        .expect("lookup")
        .expect("place kept");
    assert_eq!(stored.amenity_ids(), &[pool.id().clone()]);
}

#[rstest]
#[tokio::test]
async fn second_review_of_same_place_is_rejected(store: MemoryStore) {
    let users: &dyn UserRepository = &store;
    let places: &dyn PlaceRepository = &store;
    let reviews: &dyn ReviewRepository = &store;

    let owner = user("owner@x.com");
    users.create(&owner).await.expect("owner");
    let listed = place(&owner, Vec::new());
    places.create(&listed).await.expect("place");
    reviews
        .create(&review(&owner, &listed))
        .await
        .expect("first review");

    let err = reviews
        .create(&review(&owner, &listed))
        .await
        .expect_err("repeat review");
    assert_eq!(
        err,
        RepositoryError::duplicate(constraints::REVIEWS_USER_PLACE_KEY)
    );
}

#[rstest]
#[tokio::test]
async fn list_by_place_keeps_insertion_order(store: MemoryStore) {
    let users: &dyn UserRepository = &store;
    let places: &dyn PlaceRepository = &store;
    let reviews: &dyn ReviewRepository = &store;

    let authors: Vec<User> = (0..3).map(|i| user(&format!("guest{i}@x.com"))).collect();
    for author in &authors {
        users.create(author).await.expect("author");
    }
    let first = place(&authors[0], Vec::new());
    let second = place(&authors[0], Vec::new());
    places.create(&first).await.expect("first place");
    places.create(&second).await.expect("second place");

    let mut expected = Vec::new();
    for author in &authors {
        let on_first = review(author, &first);
        reviews.create(&on_first).await.expect("review");
        reviews
            .create(&review(author, &second))
            .await
            .expect("other review");
        expected.push(on_first.id().clone());
    }

    let listed: Vec<ReviewId> = reviews
        .list_by_place(first.id())
        .await
        .expect("list")
        .iter()
        .map(|r| r.id().clone())
        .collect();
    assert_eq!(listed, expected);
}

#[rstest]
#[tokio::test]
async fn update_of_missing_row_reports_false(store: MemoryStore) {
    let users: &dyn UserRepository = &store;
    assert!(!users.update(&user("ghost@x.com")).await.expect("update"));
    assert!(!users.delete(&UserId::random()).await.expect("delete"));
}
