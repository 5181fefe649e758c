//! Facade behaviour against the in-process store.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    AmenitiesService, CreateUserRequest, PlacesService, ReviewsService, UsersService,
};
use crate::domain::{
    AmenityId, ErrorCode, Place, PlaceDraft, PlaceId, Review, ReviewDraft, User, UserDraft,
};
use crate::outbound::memory::MemoryStore;

type MemoryFacade = HbnbFacade<MemoryStore, MemoryStore, MemoryStore, MemoryStore>;

#[fixture]
fn facade() -> MemoryFacade {
    let store = Arc::new(MemoryStore::default());
    HbnbFacade::new(
        Arc::clone(&store),
        Arc::clone(&store),
        Arc::clone(&store),
        store,
        Arc::new(DefaultClock),
    )
}

async fn register(facade: &MemoryFacade, email: &str) -> User {
    facade
        .create_user(CreateUserRequest {
            draft: UserDraft {
                first_name: "Test".to_owned(),
                last_name: "User".to_owned(),
                email: email.to_owned(),
                is_admin: false,
            },
            password: None,
        })
        .await
        .expect("user created")
}

async fn list_place(facade: &MemoryFacade, owner: &User, amenities: Vec<AmenityId>) -> Place {
    facade
        .create_place(PlaceDraft {
            title: "Seaside flat".to_owned(),
            description: String::new(),
            price: 75.5,
            latitude: 43.3,
            longitude: 5.4,
            owner_id: owner.id().clone(),
            amenity_ids: amenities,
        })
        .await
        .expect("place created")
}

async fn post_review(facade: &MemoryFacade, author: &User, place: &Place, rating: i64) -> Review {
    facade
        .create_review(ReviewDraft {
            text: "Would stay again".to_owned(),
            rating,
            user_id: author.id().clone(),
            place_id: place.id().clone(),
        })
        .await
        .expect("review created")
}

#[rstest]
#[tokio::test]
async fn duplicate_email_conflicts_in_either_case(facade: MemoryFacade) {
    register(&facade, "a@x.com").await;
    let err = facade
        .create_user(CreateUserRequest {
            draft: UserDraft {
                first_name: "Other".to_owned(),
                last_name: "Person".to_owned(),
                email: "A@X.COM".to_owned(),
                is_admin: false,
            },
            password: None,
        })
        .await
        .expect_err("duplicate");
    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn duplicate_amenity_name_conflicts(facade: MemoryFacade) {
    facade
        .create_amenity("WiFi".to_owned())
        .await
        .expect("first amenity");
    let err = facade
        .create_amenity("WiFi".to_owned())
        .await
        .expect_err("duplicate name");
    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn renaming_amenity_to_its_own_name_succeeds(facade: MemoryFacade) {
    let wifi = facade
        .create_amenity("WiFi".to_owned())
        .await
        .expect("amenity");
    let renamed = facade
        .update_amenity(wifi.id(), "WiFi".to_owned())
        .await
        .expect("same name is fine");
    assert_eq!(renamed.name(), "WiFi");
}

#[rstest]
#[tokio::test]
async fn place_with_unknown_amenity_leaves_no_trace(facade: MemoryFacade) {
    let owner = register(&facade, "owner@x.com").await;
    let err = facade
        .create_place(PlaceDraft {
            title: "Ghost".to_owned(),
            description: String::new(),
            price: 10.0,
            latitude: 0.0,
            longitude: 0.0,
            owner_id: owner.id().clone(),
            amenity_ids: vec![AmenityId::random()],
        })
        .await
        .expect_err("unknown amenity");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert!(facade.list_places().await.expect("list").is_empty());
}

#[rstest]
#[tokio::test]
async fn get_place_embeds_owner_and_amenities(facade: MemoryFacade) {
    let owner = register(&facade, "owner@x.com").await;
    let pool = facade
        .create_amenity("Pool".to_owned())
        .await
        .expect("amenity");
    let wifi = facade
        .create_amenity("WiFi".to_owned())
        .await
        .expect("amenity");
    let place = list_place(&facade, &owner, vec![wifi.id().clone(), pool.id().clone()]).await;

    let details = facade.get_place(place.id()).await.expect("details");
    assert_eq!(details.owner.id(), owner.id());
    let names: Vec<&str> = details.amenities.iter().map(|a| a.name()).collect();
    assert_eq!(names, ["WiFi", "Pool"]);
}

#[rstest]
#[tokio::test]
async fn deleting_user_cascades_to_places_and_their_reviews(facade: MemoryFacade) {
    let owner = register(&facade, "owner@x.com").await;
    let guest = register(&facade, "guest@x.com").await;
    let wifi = facade
        .create_amenity("WiFi".to_owned())
        .await
        .expect("amenity");
    let place = list_place(&facade, &owner, vec![wifi.id().clone()]).await;
    post_review(&facade, &guest, &place, 4).await;

    facade.delete_user(owner.id()).await.expect("delete owner");

    assert_eq!(
        facade
            .get_place(place.id())
            .await
            .expect_err("place removed")
            .code(),
        ErrorCode::NotFound
    );
    assert!(facade.list_reviews().await.expect("reviews").is_empty());
    assert_eq!(facade.list_amenities().await.expect("amenities").len(), 1);
    assert!(facade.get_user(guest.id()).await.is_ok());
}

#[rstest]
#[tokio::test]
async fn deleting_place_keeps_amenities(facade: MemoryFacade) {
    let owner = register(&facade, "owner@x.com").await;
    let wifi = facade
        .create_amenity("WiFi".to_owned())
        .await
        .expect("amenity");
    let place = list_place(&facade, &owner, vec![wifi.id().clone()]).await;
    post_review(&facade, &owner, &place, 3).await;

    facade.delete_place(place.id()).await.expect("delete place");

    assert!(facade.list_reviews().await.expect("reviews").is_empty());
    assert!(facade.get_amenity(wifi.id()).await.is_ok());
}

#[rstest]
#[tokio::test]
async fn review_can_be_posted_once_per_place(facade: MemoryFacade) {
    let owner = register(&facade, "owner@x.com").await;
    let place = list_place(&facade, &owner, Vec::new()).await;
    post_review(&facade, &owner, &place, 5).await;

    let err = facade
        .create_review(ReviewDraft {
            text: "Second thoughts".to_owned(),
            rating: 2,
            user_id: owner.id().clone(),
            place_id: place.id().clone(),
        })
        .await
        .expect_err("repeat review");
    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn deleted_review_can_no_longer_be_fetched(facade: MemoryFacade) {
    let owner = register(&facade, "owner@x.com").await;
    let place = list_place(&facade, &owner, Vec::new()).await;
    let review = post_review(&facade, &owner, &place, 1).await;

    facade.delete_review(review.id()).await.expect("delete");

    let err = facade.get_review(review.id()).await.expect_err("gone");
    assert_eq!(err.code(), ErrorCode::NotFound);
    let err = facade
        .delete_review(review.id())
        .await
        .expect_err("already gone");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn reviews_for_place_are_filtered_and_ordered(facade: MemoryFacade) {
    let owner = register(&facade, "owner@x.com").await;
    let first = list_place(&facade, &owner, Vec::new()).await;
    let second = list_place(&facade, &owner, Vec::new()).await;

    let mut expected = Vec::new();
    for n in 0..3 {
        let author = register(&facade, &format!("guest{n}@x.com")).await;
        expected.push(post_review(&facade, &author, &first, 5).await.id().clone());
        post_review(&facade, &author, &second, 2).await;
    }

    let listed: Vec<_> = facade
        .list_reviews_for_place(first.id())
        .await
        .expect("list")
        .into_iter()
        .map(|review| review.id().clone())
        .collect();
    assert_eq!(listed, expected);

    let unknown = facade
        .list_reviews_for_place(&PlaceId::random())
        .await
        .expect("list");
    assert!(unknown.is_empty());
}
