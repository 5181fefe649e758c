//! Handler tests for the users endpoints, backed by a mocked driving port.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::middleware::NormalizePath;
use actix_web::{App, test as actix_test, web};
use chrono::Utc;
use mockall::predicate::eq;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{
    MockAmenitiesService, MockPlacesService, MockReviewsService, MockUsersService,
};
use crate::domain::{Error, HashedPassword, Password};
use crate::inbound::http::configure;

fn sample_user() -> User {
    let mut user = User::create(
        UserDraft {
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            email: "ada@example.com".to_owned(),
            is_admin: false,
        },
        Utc::now(),
    )
    .expect("valid user");
    let password = Password::new("correct horse").expect("valid password");
    user.set_password(HashedPassword::hash(&password).expect("hash"), Utc::now());
    user
}

fn state_with(users: MockUsersService) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(
        Arc::new(users),
        Arc::new(MockAmenitiesService::new()),
        Arc::new(MockPlacesService::new()),
        Arc::new(MockReviewsService::new()),
    ))
}

async fn call(
    users: MockUsersService,
    request: actix_test::TestRequest,
) -> (StatusCode, Value) {
    let app = actix_test::init_service(
        App::new()
            .wrap(NormalizePath::trim())
            .app_data(state_with(users))
            .configure(configure),
    )
    .await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, value)
}

#[rstest]
#[case("/api/v1/users")]
#[case("/api/v1/users/")]
#[actix_web::test]
async fn create_returns_created_user_without_password(#[case] uri: &str) {
    let user = sample_user();
    let expected_id = user.id().to_string();
    let mut users = MockUsersService::new();
    users
        .expect_create_user()
        .withf(|request| {
            request.draft.email == "ada@example.com"
                && request.password.as_deref() == Some("correct horse")
        })
        .times(1)
        .return_once(move |_| Ok(user));

    let (status, body) = call(
        users,
        actix_test::TestRequest::post().uri(uri).set_json(json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com",
            "password": "correct horse",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], expected_id);
    assert_eq!(body["email"], "ada@example.com");
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
}

#[rstest]
#[actix_web::test]
async fn conflict_from_service_becomes_409() {
    let mut users = MockUsersService::new();
    users
        .expect_create_user()
        .return_once(|_| Err(Error::conflict("Email already registered")));

    let (status, body) = call(
        users,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({"first_name": "A", "last_name": "B", "email": "a@x.com"})),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "conflict");
    assert_eq!(body["message"], "Email already registered");
}

#[rstest]
#[actix_web::test]
async fn malformed_json_is_rejected_before_the_service() {
    let mut users = MockUsersService::new();
    users.expect_create_user().never();

    let (status, body) = call(
        users,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"first_name\": "),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["code"], "malformed_json");
}

#[rstest]
#[actix_web::test]
async fn wrong_json_type_is_rejected() {
    let mut users = MockUsersService::new();
    users.expect_create_user().never();

    let (status, _) = call(
        users,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({"first_name": 42, "last_name": "B", "email": "a@x.com"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[rstest]
#[actix_web::test]
async fn malformed_path_id_is_not_found() {
    let mut users = MockUsersService::new();
    users.expect_get_user().never();

    let (status, body) = call(
        users,
        actix_test::TestRequest::get().uri("/api/v1/users/not-a-uuid"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");
}

#[rstest]
#[actix_web::test]
async fn update_forwards_only_present_fields() {
    let user = sample_user();
    let id = user.id().clone();
    let mut users = MockUsersService::new();
    users
        .expect_update_user()
        .with(
            eq(id.clone()),
            eq(UpdateUserRequest {
                changes: UserUpdate {
                    last_name: Some("Byron".to_owned()),
                    ..UserUpdate::default()
                },
                password: None,
            }),
        )
        .times(1)
        .return_once(move |_, _| Ok(user));

    let (status, body) = call(
        users,
        actix_test::TestRequest::put()
            .uri(&format!("/api/v1/users/{id}"))
            .set_json(json!({"last_name": "Byron"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id.to_string());
}

#[rstest]
#[actix_web::test]
async fn delete_confirms_with_message() {
    let id = UserId::random();
    let mut users = MockUsersService::new();
    users
        .expect_delete_user()
        .with(eq(id.clone()))
        .times(1)
        .return_once(|_| Ok(()));

    let (status, body) = call(
        users,
        actix_test::TestRequest::delete().uri(&format!("/api/v1/users/{id}")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "User deleted successfully"}));
}

#[rstest]
#[actix_web::test]
async fn unavailable_store_is_503() {
    let mut users = MockUsersService::new();
    users
        .expect_list_users()
        .return_once(|| Err(Error::service_unavailable("repository unavailable: refused")));

    let (status, body) = call(users, actix_test::TestRequest::get().uri("/api/v1/users")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "service_unavailable");
}
