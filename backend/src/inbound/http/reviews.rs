//! Reviews API handlers.
//!
//! ```text
//! POST   /api/v1/reviews {"text":"Great stay","rating":5,"user_id":"…","place_id":"…"}
//! GET    /api/v1/reviews
//! GET    /api/v1/reviews/{id}
//! PUT    /api/v1/reviews/{id} {"rating":4}
//! DELETE /api/v1/reviews/{id}
//! GET    /api/v1/reviews/places/{place_id}/reviews
//! GET    /api/v1/places/{place_id}/reviews
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Number;
use tracing::debug;

use crate::domain::{Error, PlaceId, Review, ReviewDraft, ReviewId, ReviewUpdate};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, MessageResponse};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, missing_field_error, number_as_integer, parse_id, parse_reference,
};

const REVIEW_NOT_FOUND: &str = "Review not found";
const USER_NOT_FOUND: &str = "User not found";
const PLACE_NOT_FOUND: &str = "Place not found";

const RATING: FieldName = FieldName::new("rating");
const USER_ID: FieldName = FieldName::new("user_id");
const PLACE_ID: FieldName = FieldName::new("place_id");

/// Request body for `POST /api/v1/reviews`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct ReviewCreateBody {
    #[serde(default)]
    pub text: String,
    /// Whole number from 1 to 5.
    #[schema(value_type = Option<i64>, example = 5)]
    pub rating: Option<Number>,
    pub user_id: Option<String>,
    pub place_id: Option<String>,
}

impl TryFrom<ReviewCreateBody> for ReviewDraft {
    type Error = Error;

    fn try_from(body: ReviewCreateBody) -> Result<Self, Self::Error> {
        let rating = body.rating.ok_or_else(|| missing_field_error(RATING))?;
        Ok(Self {
            rating: number_as_integer(&rating, RATING)?,
            user_id: parse_reference(body.user_id, USER_ID, USER_NOT_FOUND)?,
            place_id: parse_reference(body.place_id, PLACE_ID, PLACE_NOT_FOUND)?,
            text: body.text,
        })
    }
}

/// Request body for `PUT /api/v1/reviews/{id}`. Only text and rating change.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct ReviewUpdateBody {
    pub text: Option<String>,
    #[schema(value_type = Option<i64>)]
    pub rating: Option<Number>,
}

impl TryFrom<ReviewUpdateBody> for ReviewUpdate {
    type Error = Error;

    fn try_from(body: ReviewUpdateBody) -> Result<Self, Self::Error> {
        Ok(Self {
            text: body.text,
            rating: body
                .rating
                .map(|rating| number_as_integer(&rating, RATING))
                .transpose()?,
        })
    }
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct ReviewResponse {
    pub id: String,
    pub text: String,
    pub rating: u8,
    pub user_id: String,
    pub place_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Review> for ReviewResponse {
    fn from(review: &Review) -> Self {
        Self {
            id: review.id().to_string(),
            text: review.text().to_owned(),
            rating: review.rating().get(),
            user_id: review.user_id().to_string(),
            place_id: review.place_id().to_string(),
            created_at: review.created_at(),
            updated_at: review.updated_at(),
        }
    }
}

fn to_responses(reviews: &[Review]) -> Vec<ReviewResponse> {
    reviews.iter().map(ReviewResponse::from).collect()
}

/// Review a place. One review per user and place.
#[utoipa::path(
    post,
    path = "/api/v1/reviews",
    request_body = ReviewCreateBody,
    responses(
        (status = 201, description = "Review created", body = ReviewResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "User or place not found", body = ErrorSchema),
        (status = 409, description = "User has already reviewed this place", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "createReview"
)]
#[post("/reviews")]
pub async fn create_review(
    state: web::Data<HttpState>,
    payload: web::Json<ReviewCreateBody>,
) -> ApiResult<HttpResponse> {
    let draft = ReviewDraft::try_from(payload.into_inner())?;
    let review = state.reviews.create_review(draft).await?;
    Ok(HttpResponse::Created().json(ReviewResponse::from(&review)))
}

#[utoipa::path(
    get,
    path = "/api/v1/reviews",
    responses(
        (status = 200, description = "Reviews", body = [ReviewResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "listReviews"
)]
#[get("/reviews")]
pub async fn list_reviews(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<ReviewResponse>>> {
    let reviews = state.reviews.list_reviews().await?;
    Ok(web::Json(to_responses(&reviews)))
}

#[utoipa::path(
    get,
    path = "/api/v1/reviews/{id}",
    params(("id" = String, Path, description = "Review identifier")),
    responses(
        (status = 200, description = "Review", body = ReviewResponse),
        (status = 404, description = "Review not found", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "getReview"
)]
#[get("/reviews/{id}")]
pub async fn get_review(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ReviewResponse>> {
    let id: ReviewId = parse_id(path.into_inner(), REVIEW_NOT_FOUND)?;
    let review = state.reviews.get_review(&id).await?;
    Ok(web::Json(ReviewResponse::from(&review)))
}

#[utoipa::path(
    put,
    path = "/api/v1/reviews/{id}",
    params(("id" = String, Path, description = "Review identifier")),
    request_body = ReviewUpdateBody,
    responses(
        (status = 200, description = "Updated review", body = ReviewResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Review not found", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "updateReview"
)]
#[put("/reviews/{id}")]
pub async fn update_review(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<ReviewUpdateBody>,
) -> ApiResult<web::Json<ReviewResponse>> {
    let id: ReviewId = parse_id(path.into_inner(), REVIEW_NOT_FOUND)?;
    let update = ReviewUpdate::try_from(payload.into_inner())?;
    let review = state.reviews.update_review(&id, update).await?;
    Ok(web::Json(ReviewResponse::from(&review)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/reviews/{id}",
    params(("id" = String, Path, description = "Review identifier")),
    responses(
        (status = 200, description = "Review deleted", body = MessageResponse),
        (status = 404, description = "Review not found", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "deleteReview"
)]
#[delete("/reviews/{id}")]
pub async fn delete_review(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id: ReviewId = parse_id(path.into_inner(), REVIEW_NOT_FOUND)?;
    state.reviews.delete_review(&id).await?;
    Ok(web::Json(MessageResponse::new("Review deleted successfully")))
}

/// Reviews of one place in creation order.
///
/// A place id that is not a UUID cannot match any review, so it yields an
/// empty list like any other unknown place.
async fn reviews_for_place(state: &HttpState, raw: String) -> ApiResult<Vec<ReviewResponse>> {
    let Ok(place_id) = PlaceId::try_from(raw) else {
        debug!("malformed place id in review listing");
        return Ok(Vec::new());
    };
    let reviews = state.reviews.list_reviews_for_place(&place_id).await?;
    Ok(to_responses(&reviews))
}

#[utoipa::path(
    get,
    path = "/api/v1/reviews/places/{place_id}/reviews",
    params(("place_id" = String, Path, description = "Place identifier")),
    responses(
        (status = 200, description = "Reviews of the place", body = [ReviewResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "listReviewsForPlace"
)]
#[get("/reviews/places/{place_id}/reviews")]
pub async fn list_reviews_for_place(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<ReviewResponse>>> {
    Ok(web::Json(reviews_for_place(&state, path.into_inner()).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/places/{place_id}/reviews",
    params(("place_id" = String, Path, description = "Place identifier")),
    responses(
        (status = 200, description = "Reviews of the place", body = [ReviewResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["places"],
    operation_id = "listPlaceReviews"
)]
#[get("/places/{place_id}/reviews")]
pub async fn list_place_reviews(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<ReviewResponse>>> {
    Ok(web::Json(reviews_for_place(&state, path.into_inner()).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode, UserId};
    use rstest::rstest;
    use serde_json::json;

    fn create_body(rating: serde_json::Value) -> ReviewCreateBody {
        serde_json::from_value(json!({
            "text": "Lovely",
            "rating": rating,
            "user_id": UserId::random().to_string(),
            "place_id": PlaceId::random().to_string(),
        }))
        .expect("body deserialises")
    }

    #[rstest]
    #[case(json!(1), 1)]
    #[case(json!(5), 5)]
    #[case(json!(6), 6)]
    fn integer_ratings_reach_the_domain(#[case] rating: serde_json::Value, #[case] expected: i64) {
        let draft = ReviewDraft::try_from(create_body(rating)).expect("integer rating");
        assert_eq!(draft.rating, expected);
    }

    #[rstest]
    fn fractional_rating_is_rejected() {
        let err = ReviewDraft::try_from(create_body(json!(4.5))).expect_err("fractional");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "rating must be an integer");
    }

    #[rstest]
    fn missing_rating_is_reported() {
        let err = ReviewDraft::try_from(create_body(serde_json::Value::Null))
            .expect_err("missing rating");
        assert_eq!(err.message(), "missing required field: rating");
    }

    #[rstest]
    fn update_keeps_absent_fields() {
        let body: ReviewUpdateBody =
            serde_json::from_value(json!({"rating": 2})).expect("body deserialises");
        let update = ReviewUpdate::try_from(body).expect("valid update");
        assert_eq!(
            update,
            ReviewUpdate {
                text: None,
                rating: Some(2)
            }
        );
    }
}
