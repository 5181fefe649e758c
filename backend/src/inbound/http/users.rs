//! Users API handlers.
//!
//! ```text
//! POST   /api/v1/users {"first_name":"Ada","last_name":"Lovelace","email":"ada@example.com"}
//! GET    /api/v1/users
//! GET    /api/v1/users/{id}
//! PUT    /api/v1/users/{id} {"last_name":"Byron"}
//! DELETE /api/v1/users/{id}
//! ```
//!
//! Passwords are accepted on create and update but never echoed back.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::ports::{CreateUserRequest, UpdateUserRequest};
use crate::domain::{User, UserDraft, UserId, UserUpdate};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, MessageResponse};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_id;

const USER_NOT_FOUND: &str = "User not found";

/// Request body for `POST /api/v1/users`.
///
/// Missing text fields read as empty and fail the entity's "is required"
/// rule.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UserCreateBody {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

impl From<UserCreateBody> for CreateUserRequest {
    fn from(body: UserCreateBody) -> Self {
        Self {
            draft: UserDraft {
                first_name: body.first_name,
                last_name: body.last_name,
                email: body.email,
                is_admin: body.is_admin,
            },
            password: body.password,
        }
    }
}

/// Request body for `PUT /api/v1/users/{id}`. Absent fields stay unchanged.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UserUpdateBody {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub is_admin: Option<bool>,
}

impl From<UserUpdateBody> for UpdateUserRequest {
    fn from(body: UserUpdateBody) -> Self {
        Self {
            changes: UserUpdate {
                first_name: body.first_name,
                last_name: body.last_name,
                email: body.email,
                is_admin: body.is_admin,
            },
            password: body.password,
        }
    }
}

/// User as returned by the API. The password hash is never included.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            first_name: user.first_name().to_owned(),
            last_name: user.last_name().to_owned(),
            email: user.email().as_ref().to_owned(),
            is_admin: user.is_admin(),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        }
    }
}

/// Register a user.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = UserCreateBody,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserCreateBody>,
) -> ApiResult<HttpResponse> {
    let user = state
        .users
        .create_user(payload.into_inner().into())
        .await?;
    info!(user_id = %user.id(), "user registered over http");
    Ok(HttpResponse::Created().json(UserResponse::from(&user)))
}

/// List users in registration order.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Users", body = [UserResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let users = state.users.list_users().await?;
    Ok(web::Json(users.iter().map(UserResponse::from).collect()))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let id: UserId = parse_id(path.into_inner(), USER_NOT_FOUND)?;
    let user = state.users.get_user(&id).await?;
    Ok(web::Json(UserResponse::from(&user)))
}

/// Update a user's attributes.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    request_body = UserUpdateBody,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UserUpdateBody>,
) -> ApiResult<web::Json<UserResponse>> {
    let id: UserId = parse_id(path.into_inner(), USER_NOT_FOUND)?;
    let user = state
        .users
        .update_user(&id, payload.into_inner().into())
        .await?;
    Ok(web::Json(UserResponse::from(&user)))
}

/// Delete a user together with their places and reviews.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 404, description = "User not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id: UserId = parse_id(path.into_inner(), USER_NOT_FOUND)?;
    state.users.delete_user(&id).await?;
    Ok(web::Json(MessageResponse::new("User deleted successfully")))
}

#[cfg(test)]
mod tests;
