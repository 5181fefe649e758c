//! Places API handlers.
//!
//! ```text
//! POST   /api/v1/places {"title":"Loft","price":120,"latitude":48.85,"longitude":2.35,
//!                        "owner_id":"…","amenities":["…"]}
//! GET    /api/v1/places
//! GET    /api/v1/places/{id}
//! PUT    /api/v1/places/{id} {"price":99.5}
//! DELETE /api/v1/places/{id}
//! ```
//!
//! `GET /places/{id}` embeds the owner and the linked amenities; the other
//! endpoints reference them by id.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::domain::ports::PlaceDetails;
use crate::domain::{AmenityId, Error, Place, PlaceDraft, PlaceId, PlaceUpdate, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, MessageResponse};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, optional_f64, parse_id, parse_reference, parse_reference_list, required_f64,
};

const PLACE_NOT_FOUND: &str = "Place not found";
const OWNER_NOT_FOUND: &str = "Owner not found";
const AMENITY_NOT_FOUND: &str = "Amenity not found";

const PRICE: FieldName = FieldName::new("price");
const LATITUDE: FieldName = FieldName::new("latitude");
const LONGITUDE: FieldName = FieldName::new("longitude");
const OWNER_ID: FieldName = FieldName::new("owner_id");

/// Request body for `POST /api/v1/places`.
///
/// Numbers are read as raw JSON numbers so integers and floats are both
/// accepted for price and coordinates.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct PlaceCreateBody {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[schema(value_type = Option<f64>, example = 120.0)]
    pub price: Option<Number>,
    #[schema(value_type = Option<f64>, example = 48.8566)]
    pub latitude: Option<Number>,
    #[schema(value_type = Option<f64>, example = 2.3522)]
    pub longitude: Option<Number>,
    pub owner_id: Option<String>,
    /// Amenity identifiers to link, in display order.
    #[serde(default, alias = "amenity_ids")]
    pub amenities: Vec<String>,
}

impl TryFrom<PlaceCreateBody> for PlaceDraft {
    type Error = Error;

    fn try_from(body: PlaceCreateBody) -> Result<Self, Self::Error> {
        Ok(Self {
            price: required_f64(body.price, PRICE)?,
            latitude: required_f64(body.latitude, LATITUDE)?,
            longitude: required_f64(body.longitude, LONGITUDE)?,
            owner_id: parse_reference(body.owner_id, OWNER_ID, OWNER_NOT_FOUND)?,
            amenity_ids: parse_reference_list(body.amenities, AMENITY_NOT_FOUND)?,
            title: body.title,
            description: body.description,
        })
    }
}

/// Request body for `PUT /api/v1/places/{id}`. Absent fields stay unchanged;
/// a present `amenities` list replaces the linked set.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct PlaceUpdateBody {
    pub title: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub price: Option<Number>,
    #[schema(value_type = Option<f64>)]
    pub latitude: Option<Number>,
    #[schema(value_type = Option<f64>)]
    pub longitude: Option<Number>,
    pub owner_id: Option<String>,
    #[serde(default, alias = "amenity_ids")]
    pub amenities: Option<Vec<String>>,
}

impl TryFrom<PlaceUpdateBody> for PlaceUpdate {
    type Error = Error;

    fn try_from(body: PlaceUpdateBody) -> Result<Self, Self::Error> {
        Ok(Self {
            price: optional_f64(body.price, PRICE)?,
            latitude: optional_f64(body.latitude, LATITUDE)?,
            longitude: optional_f64(body.longitude, LONGITUDE)?,
            owner_id: body
                .owner_id
                .map(|raw| parse_id::<UserId>(raw, OWNER_NOT_FOUND))
                .transpose()?,
            amenity_ids: body
                .amenities
                .map(|ids| parse_reference_list::<AmenityId>(ids, AMENITY_NOT_FOUND))
                .transpose()?,
            title: body.title,
            description: body.description,
        })
    }
}

/// Place with its references as identifiers.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct PlaceResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub owner_id: String,
    /// Linked amenity identifiers in link order.
    pub amenities: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Place> for PlaceResponse {
    fn from(place: &Place) -> Self {
        Self {
            id: place.id().to_string(),
            title: place.title().to_owned(),
            description: place.description().to_owned(),
            price: place.price(),
            latitude: place.latitude(),
            longitude: place.longitude(),
            owner_id: place.owner_id().to_string(),
            amenities: place.amenity_ids().iter().map(ToString::to_string).collect(),
            created_at: place.created_at(),
            updated_at: place.updated_at(),
        }
    }
}

/// Entry of the place listing.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct PlaceSummary {
    pub id: String,
    pub title: String,
    pub price: f64,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&Place> for PlaceSummary {
    fn from(place: &Place) -> Self {
        Self {
            id: place.id().to_string(),
            title: place.title().to_owned(),
            price: place.price(),
            latitude: place.latitude(),
            longitude: place.longitude(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct OwnerSummary {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct AmenitySummary {
    pub id: String,
    pub name: String,
}

/// Place with its owner and amenities embedded.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct PlaceDetailsResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub owner: OwnerSummary,
    pub amenities: Vec<AmenitySummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&PlaceDetails> for PlaceDetailsResponse {
    fn from(details: &PlaceDetails) -> Self {
        let PlaceDetails {
            place,
            owner,
            amenities,
        } = details;
        Self {
            id: place.id().to_string(),
            title: place.title().to_owned(),
            description: place.description().to_owned(),
            price: place.price(),
            latitude: place.latitude(),
            longitude: place.longitude(),
            owner: OwnerSummary {
                id: owner.id().to_string(),
                first_name: owner.first_name().to_owned(),
                last_name: owner.last_name().to_owned(),
                email: owner.email().as_ref().to_owned(),
            },
            amenities: amenities
                .iter()
                .map(|amenity| AmenitySummary {
                    id: amenity.id().to_string(),
                    name: amenity.name().to_owned(),
                })
                .collect(),
            created_at: place.created_at(),
            updated_at: place.updated_at(),
        }
    }
}

/// List a place. The owner and every amenity must exist.
#[utoipa::path(
    post,
    path = "/api/v1/places",
    request_body = PlaceCreateBody,
    responses(
        (status = 201, description = "Place created", body = PlaceResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Owner or amenity not found", body = ErrorSchema)
    ),
    tags = ["places"],
    operation_id = "createPlace"
)]
#[post("/places")]
pub async fn create_place(
    state: web::Data<HttpState>,
    payload: web::Json<PlaceCreateBody>,
) -> ApiResult<HttpResponse> {
    let draft = PlaceDraft::try_from(payload.into_inner())?;
    let place = state.places.create_place(draft).await?;
    Ok(HttpResponse::Created().json(PlaceResponse::from(&place)))
}

#[utoipa::path(
    get,
    path = "/api/v1/places",
    responses(
        (status = 200, description = "Places", body = [PlaceSummary]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["places"],
    operation_id = "listPlaces"
)]
#[get("/places")]
pub async fn list_places(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<PlaceSummary>>> {
    let places = state.places.list_places().await?;
    Ok(web::Json(places.iter().map(PlaceSummary::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/places/{id}",
    params(("id" = String, Path, description = "Place identifier")),
    responses(
        (status = 200, description = "Place with owner and amenities", body = PlaceDetailsResponse),
        (status = 404, description = "Place not found", body = ErrorSchema)
    ),
    tags = ["places"],
    operation_id = "getPlace"
)]
#[get("/places/{id}")]
pub async fn get_place(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<PlaceDetailsResponse>> {
    let id: PlaceId = parse_id(path.into_inner(), PLACE_NOT_FOUND)?;
    let details = state.places.get_place(&id).await?;
    Ok(web::Json(PlaceDetailsResponse::from(&details)))
}

#[utoipa::path(
    put,
    path = "/api/v1/places/{id}",
    params(("id" = String, Path, description = "Place identifier")),
    request_body = PlaceUpdateBody,
    responses(
        (status = 200, description = "Updated place", body = PlaceResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Place, owner or amenity not found", body = ErrorSchema)
    ),
    tags = ["places"],
    operation_id = "updatePlace"
)]
#[put("/places/{id}")]
pub async fn update_place(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<PlaceUpdateBody>,
) -> ApiResult<web::Json<PlaceResponse>> {
    let id: PlaceId = parse_id(path.into_inner(), PLACE_NOT_FOUND)?;
    let update = PlaceUpdate::try_from(payload.into_inner())?;
    let place = state.places.update_place(&id, update).await?;
    Ok(web::Json(PlaceResponse::from(&place)))
}

/// Delete a place together with its reviews and amenity links.
#[utoipa::path(
    delete,
    path = "/api/v1/places/{id}",
    params(("id" = String, Path, description = "Place identifier")),
    responses(
        (status = 200, description = "Place deleted", body = MessageResponse),
        (status = 404, description = "Place not found", body = ErrorSchema)
    ),
    tags = ["places"],
    operation_id = "deletePlace"
)]
#[delete("/places/{id}")]
pub async fn delete_place(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id: PlaceId = parse_id(path.into_inner(), PLACE_NOT_FOUND)?;
    state.places.delete_place(&id).await?;
    Ok(web::Json(MessageResponse::new("Place deleted successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;
    use serde_json::json;

    fn create_body(value: serde_json::Value) -> PlaceCreateBody {
        serde_json::from_value(value).expect("body deserialises")
    }

    #[rstest]
    fn integer_price_becomes_float() {
        let owner = UserId::random();
        let draft = PlaceDraft::try_from(create_body(json!({
            "title": "Loft",
            "price": 100,
            "latitude": -90,
            "longitude": 180.0,
            "owner_id": owner.to_string(),
        })))
        .expect("valid body");
        assert_eq!(draft.price, 100.0);
        assert_eq!(draft.latitude, -90.0);
        assert_eq!(draft.owner_id, owner);
        assert!(draft.amenity_ids.is_empty());
    }

    #[rstest]
    fn amenity_ids_alias_is_accepted() {
        let amenity = AmenityId::random();
        let draft = PlaceDraft::try_from(create_body(json!({
            "title": "Loft",
            "price": 1,
            "latitude": 0,
            "longitude": 0,
            "owner_id": UserId::random().to_string(),
            "amenity_ids": [amenity.to_string()],
        })))
        .expect("valid body");
        assert_eq!(draft.amenity_ids, vec![amenity]);
    }

    #[rstest]
    #[case(json!({"title": "Loft", "latitude": 0, "longitude": 0, "owner_id": UserId::random().to_string()}), "missing required field: price")]
    #[case(json!({"title": "Loft", "price": 5, "latitude": 0, "longitude": 0}), "missing required field: owner_id")]
    fn missing_fields_are_invalid_requests(
        #[case] value: serde_json::Value,
        #[case] message: &str,
    ) {
        let err = PlaceDraft::try_from(create_body(value)).expect_err("incomplete body");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), message);
    }

    #[rstest]
    fn malformed_owner_is_not_found() {
        let err = PlaceDraft::try_from(create_body(json!({
            "title": "Loft",
            "price": 5,
            "latitude": 0,
            "longitude": 0,
            "owner_id": "owner-1",
        })))
        .expect_err("malformed owner");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), OWNER_NOT_FOUND);
    }

    #[rstest]
    fn empty_update_changes_nothing() {
        let body: PlaceUpdateBody = serde_json::from_value(json!({})).expect("empty body");
        let update = PlaceUpdate::try_from(body).expect("valid update");
        assert_eq!(update, PlaceUpdate::default());
    }
}
