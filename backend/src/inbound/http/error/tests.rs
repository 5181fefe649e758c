//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use actix_web::test::TestRequest;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("taken"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

async fn response_payload(
    error: Error,
    expected_status: StatusCode,
    expected_trace_id: Option<&str>,
) -> serde_json::Value {
    let response = ResponseError::error_response(&error);
    assert_eq!(response.status(), expected_status);

    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("trace-id header is ASCII").to_owned());
    assert_eq!(header.as_deref(), expected_trace_id);

    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    serde_json::from_slice(&bytes).expect("error body is JSON")
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(expected_trace_id: String) {
    let error = Error::internal("connection string leaked")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"secret": "x"}));

    let payload = response_payload(
        error,
        StatusCode::INTERNAL_SERVER_ERROR,
        Some(expected_trace_id.as_str()),
    )
    .await;

    assert_eq!(
        payload,
        json!({
            "code": "internal_error",
            "message": "Internal server error",
            "traceId": TRACE_ID,
        })
    );
}

#[rstest]
#[actix_web::test]
async fn conflict_keeps_message_and_details(expected_trace_id: String) {
    let error = Error::conflict("Email already registered")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"field": "email", "code": "duplicate"}));

    let payload =
        response_payload(error, StatusCode::CONFLICT, Some(expected_trace_id.as_str())).await;

    assert_eq!(payload["code"], "conflict");
    assert_eq!(payload["message"], "Email already registered");
    assert_eq!(payload["details"]["field"], "email");
}

#[rstest]
#[actix_web::test]
async fn error_without_trace_id_omits_trace_header() {
    let error = Error::invalid_request("bad").with_details(json!({"field": "name"}));

    let payload = response_payload(error, StatusCode::BAD_REQUEST, None).await;
    assert_eq!(payload.get("traceId"), None);
    assert_eq!(payload["details"], json!({"field": "name"}));
}

#[rstest]
#[case(JsonPayloadError::ContentType, "unsupported_content_type")]
#[case(JsonPayloadError::Overflow { limit: 16 }, "payload_too_large")]
#[actix_web::test]
async fn json_errors_become_invalid_requests(
    #[case] err: JsonPayloadError,
    #[case] detail_code: &str,
) {
    let req = TestRequest::post().uri("/api/v1/users").to_http_request();
    let response = json_error_handler(err, &req).error_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let payload: serde_json::Value = serde_json::from_slice(&bytes).expect("error body is JSON");
    assert_eq!(payload["code"], "invalid_request");
    assert_eq!(payload["details"]["code"], detail_code);
}
