//! Tests for HTTP error mapping.

use super::*;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use rstest_bdd_macros::{given, then, when};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[fixture]
fn internal_error_case(expected_trace_id: String) -> Error {
    Error::internal("snapshot write failed: disk full")
        .with_trace_id(expected_trace_id)
        .with_details(json!({"path": "/var/lib/lmis/learners.json"}))
}

#[fixture]
fn not_found_case(expected_trace_id: String) -> Error {
    Error::not_found("learner 7 not found").with_trace_id(expected_trace_id)
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

async fn assert_error_response(
    error: Error,
    expected_status: StatusCode,
    expected_trace_id: Option<&str>,
) -> Error {
    let response = ResponseError::error_response(&error);
    assert_eq!(response.status(), expected_status);

    let header = response.headers().get(TRACE_ID_HEADER);
    match expected_trace_id {
        Some(expected) => {
            let trace_id = header
                .expect("trace-id header is set by error_response")
                .to_str()
                .expect("trace-id not valid UTF-8");
            assert_eq!(trace_id, expected);
        }
        None => assert!(header.is_none(), "trace-id header should not be present"),
    }

    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");

    serde_json::from_slice(&bytes).expect("Error JSON deserialisation succeeds")
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted_but_keep_trace_id(
    #[from(internal_error_case)] internal_error: Error,
    expected_trace_id: String,
) {
    let redacted = assert_error_response(
        internal_error,
        StatusCode::INTERNAL_SERVER_ERROR,
        Some(expected_trace_id.as_str()),
    )
    .await;

    assert_eq!(redacted.code(), ErrorCode::InternalError);
    assert_eq!(redacted.message(), "Internal server error");
    assert!(redacted.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn not_found_errors_pass_through(
    #[from(not_found_case)] not_found: Error,
    expected_trace_id: String,
) {
    let payload = assert_error_response(
        not_found,
        StatusCode::NOT_FOUND,
        Some(expected_trace_id.as_str()),
    )
    .await;

    assert_eq!(payload.code(), ErrorCode::NotFound);
    assert_eq!(payload.message(), "learner 7 not found");
}

#[rstest]
#[actix_web::test]
async fn error_without_trace_id_omits_trace_header() {
    let error = Error::invalid_request("bad").with_details(json!({"field": "name"}));

    let payload = assert_error_response(error, StatusCode::BAD_REQUEST, None).await;
    assert_eq!(payload.trace_id(), None);
    assert_eq!(payload.details(), Some(&json!({"field": "name"})));
}

#[given("a not found error code")]
fn a_not_found_error_code() -> ErrorCode {
    ErrorCode::NotFound
}

#[when("the adapter maps the code to an HTTP status")]
fn the_adapter_maps_the_code_to_http_status(code: ErrorCode) -> StatusCode {
    super::status_for(code)
}

#[then("the status is 404 Not Found")]
fn the_status_is_404_not_found(status: StatusCode) {
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[given("an internal error template")]
fn an_internal_error_template() -> (ErrorCode, &'static str) {
    (ErrorCode::InternalError, "boom")
}

#[when("the adapter redacts the client payload")]
fn the_adapter_redacts_the_client_payload(template: (ErrorCode, &'static str)) -> String {
    let (code, message) = template;
    let error = if let ErrorCode::InternalError = code {
        Error::internal(message)
    } else {
        Error::invalid_request(message)
    }
    .with_trace_id(TRACE_ID)
    .with_details(json!({"secret": true}));

    super::redact_if_internal(&error).message().to_owned()
}

#[then("clients see the generic internal error message")]
fn clients_see_the_generic_internal_error_message(message: String) {
    assert_eq!(message, "Internal server error");
}

#[rstest]
fn not_found_maps_to_404() {
    let code = a_not_found_error_code();
    let status = the_adapter_maps_the_code_to_http_status(code);
    the_status_is_404_not_found(status);
}

#[rstest]
fn internal_messages_never_reach_clients() {
    let template = an_internal_error_template();
    let message = the_adapter_redacts_the_client_payload(template);
    clients_see_the_generic_internal_error_message(message);
}

#[test]
fn json_content_type_errors_are_invalid_requests() {
    let request = actix_web::test::TestRequest::default().to_http_request();
    let err = json_error_handler(JsonPayloadError::ContentType, &request);

    assert_eq!(err.as_response_error().status_code(), StatusCode::BAD_REQUEST);
}
