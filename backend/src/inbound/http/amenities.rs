//! Amenities API handlers.
//!
//! ```text
//! POST   /api/v1/amenities {"name":"Wi-Fi"}
//! GET    /api/v1/amenities
//! GET    /api/v1/amenities/{id}
//! PUT    /api/v1/amenities/{id} {"name":"Fast Wi-Fi"}
//! DELETE /api/v1/amenities/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Amenity, AmenityId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, MessageResponse};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_id;

const AMENITY_NOT_FOUND: &str = "Amenity not found";

/// Request body for creating or renaming an amenity.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct AmenityBody {
    #[serde(default)]
    #[schema(example = "Wi-Fi")]
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct AmenityResponse {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Amenity> for AmenityResponse {
    fn from(amenity: &Amenity) -> Self {
        Self {
            id: amenity.id().to_string(),
            name: amenity.name().to_owned(),
            created_at: amenity.created_at(),
            updated_at: amenity.updated_at(),
        }
    }
}

/// Register an amenity. Names are unique.
#[utoipa::path(
    post,
    path = "/api/v1/amenities",
    request_body = AmenityBody,
    responses(
        (status = 201, description = "Amenity created", body = AmenityResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Amenity already exists", body = ErrorSchema)
    ),
    tags = ["amenities"],
    operation_id = "createAmenity"
)]
#[post("/amenities")]
pub async fn create_amenity(
    state: web::Data<HttpState>,
    payload: web::Json<AmenityBody>,
) -> ApiResult<HttpResponse> {
    let amenity = state
        .amenities
        .create_amenity(payload.into_inner().name)
        .await?;
    Ok(HttpResponse::Created().json(AmenityResponse::from(&amenity)))
}

#[utoipa::path(
    get,
    path = "/api/v1/amenities",
    responses(
        (status = 200, description = "Amenities", body = [AmenityResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["amenities"],
    operation_id = "listAmenities"
)]
#[get("/amenities")]
pub async fn list_amenities(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<AmenityResponse>>> {
    let amenities = state.amenities.list_amenities().await?;
    Ok(web::Json(
        amenities.iter().map(AmenityResponse::from).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/amenities/{id}",
    params(("id" = String, Path, description = "Amenity identifier")),
    responses(
        (status = 200, description = "Amenity", body = AmenityResponse),
        (status = 404, description = "Amenity not found", body = ErrorSchema)
    ),
    tags = ["amenities"],
    operation_id = "getAmenity"
)]
#[get("/amenities/{id}")]
pub async fn get_amenity(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<AmenityResponse>> {
    let id: AmenityId = parse_id(path.into_inner(), AMENITY_NOT_FOUND)?;
    let amenity = state.amenities.get_amenity(&id).await?;
    Ok(web::Json(AmenityResponse::from(&amenity)))
}

/// Rename an amenity.
#[utoipa::path(
    put,
    path = "/api/v1/amenities/{id}",
    params(("id" = String, Path, description = "Amenity identifier")),
    request_body = AmenityBody,
    responses(
        (status = 200, description = "Updated amenity", body = AmenityResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Amenity not found", body = ErrorSchema),
        (status = 409, description = "Amenity already exists", body = ErrorSchema)
    ),
    tags = ["amenities"],
    operation_id = "updateAmenity"
)]
#[put("/amenities/{id}")]
pub async fn update_amenity(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<AmenityBody>,
) -> ApiResult<web::Json<AmenityResponse>> {
    let id: AmenityId = parse_id(path.into_inner(), AMENITY_NOT_FOUND)?;
    let amenity = state
        .amenities
        .update_amenity(&id, payload.into_inner().name)
        .await?;
    Ok(web::Json(AmenityResponse::from(&amenity)))
}

/// Delete an amenity. Places keep existing without it.
#[utoipa::path(
    delete,
    path = "/api/v1/amenities/{id}",
    params(("id" = String, Path, description = "Amenity identifier")),
    responses(
        (status = 200, description = "Amenity deleted", body = MessageResponse),
        (status = 404, description = "Amenity not found", body = ErrorSchema)
    ),
    tags = ["amenities"],
    operation_id = "deleteAmenity"
)]
#[delete("/amenities/{id}")]
pub async fn delete_amenity(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id: AmenityId = parse_id(path.into_inner(), AMENITY_NOT_FOUND)?;
    state.amenities.delete_amenity(&id).await?;
    Ok(web::Json(MessageResponse::new(
        "Amenity deleted successfully",
    )))
}
