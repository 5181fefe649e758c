//! In-process HTTP harness over the in-memory store.

use std::sync::Arc;

use actix_http::Request;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::middleware::NormalizePath;
use actix_web::test::{self as actix_test, TestRequest};
use actix_web::{App, web};
use hbnb::Trace;
use hbnb::domain::HbnbFacade;
use hbnb::inbound::http::configure;
use hbnb::inbound::http::state::HttpState;
use hbnb::middleware::trace::TRACE_ID_HEADER;
use hbnb::outbound::memory::MemoryStore;
use mockable::DefaultClock;
use serde_json::{Value, json};

/// App wired exactly as the server wires it, with a fresh empty store.
pub fn memory_app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let store = Arc::new(MemoryStore::default());
    let facade = HbnbFacade::new(
        Arc::clone(&store),
        Arc::clone(&store),
        Arc::clone(&store),
        store,
        Arc::new(DefaultClock),
    );
    App::new()
        .app_data(web::Data::new(HttpState::from_service(Arc::new(facade))))
        .wrap(NormalizePath::trim())
        .wrap(Trace)
        .configure(configure)
}

/// Status, trace header and JSON body of one exchange.
#[derive(Debug)]
pub struct Reply {
    pub status: StatusCode,
    pub trace_id: Option<String>,
    pub body: Value,
}

pub async fn send<S>(app: &S, request: TestRequest) -> Reply
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = actix_test::call_service(app, request.to_request()).await;
    let status = response.status();
    let trace_id = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = actix_test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body is JSON")
    };
    Reply {
        status,
        trace_id,
        body,
    }
}

pub async fn post<S>(app: &S, uri: &str, body: Value) -> Reply
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    send(app, TestRequest::post().uri(uri).set_json(body)).await
}

pub async fn put<S>(app: &S, uri: &str, body: Value) -> Reply
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    send(app, TestRequest::put().uri(uri).set_json(body)).await
}

pub async fn get<S>(app: &S, uri: &str) -> Reply
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    send(app, TestRequest::get().uri(uri)).await
}

pub async fn delete<S>(app: &S, uri: &str) -> Reply
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    send(app, TestRequest::delete().uri(uri)).await
}

/// Create a user and return its id.
pub async fn create_user<S>(app: &S, email: &str) -> String
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let reply = post(
        app,
        "/api/v1/users/",
        json!({
            "first_name": "Test",
            "last_name": "User",
            "email": email,
            "password": "s3cret-pass",
        }),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED, "{:?}", reply.body);
    id_of(&reply)
}

pub async fn create_amenity<S>(app: &S, name: &str) -> String
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let reply = post(app, "/api/v1/amenities/", json!({ "name": name })).await;
    assert_eq!(reply.status, StatusCode::CREATED, "{:?}", reply.body);
    id_of(&reply)
}

pub async fn create_place<S>(app: &S, owner_id: &str, amenities: &[&str]) -> String
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let reply = post(
        app,
        "/api/v1/places/",
        json!({
            "title": "Harbour loft",
            "description": "Two rooms over the water",
            "price": 120,
            "latitude": 43.29,
            "longitude": 5.37,
            "owner_id": owner_id,
            "amenities": amenities,
        }),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED, "{:?}", reply.body);
    id_of(&reply)
}

pub async fn create_review<S>(app: &S, user_id: &str, place_id: &str, rating: i64) -> String
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let reply = post(
        app,
        "/api/v1/reviews/",
        json!({
            "text": "Would stay again",
            "rating": rating,
            "user_id": user_id,
            "place_id": place_id,
        }),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED, "{:?}", reply.body);
    id_of(&reply)
}

pub fn id_of(reply: &Reply) -> String {
    reply.body["id"]
        .as_str()
        .expect("record carries an id")
        .to_owned()
}
