//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use rstest::rstest;

use crate::domain::TraceId;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

async fn traced(build: impl FnOnce() -> Error) -> Error {
    let trace_id: TraceId = TRACE_ID.parse().expect("valid trace id");
    TraceId::scope(trace_id, async move { build() }).await
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] expected: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), expected);
}

struct Rendered {
    status: StatusCode,
    trace_id: Option<String>,
    body: String,
}

async fn render(error: &Error) -> Rendered {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let trace_id = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    Rendered {
        status,
        trace_id,
        body: String::from_utf8(bytes.to_vec()).expect("utf-8 body"),
    }
}

#[rstest]
#[actix_web::test]
async fn internal_messages_are_redacted() {
    let error = traced(|| Error::internal("database password rejected")).await;
    let rendered = render(&error).await;
    assert_eq!(rendered.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(rendered.body.contains(INTERNAL_MESSAGE));
    assert!(!rendered.body.contains("password"));
    assert!(rendered.body.contains(TRACE_ID));
}

#[rstest]
#[actix_web::test]
async fn client_errors_show_their_message_and_trace_header() {
    let error = traced(|| Error::not_found("The requested list does not exist.")).await;
    let rendered = render(&error).await;
    assert_eq!(rendered.status, StatusCode::NOT_FOUND);
    assert_eq!(rendered.trace_id.as_deref(), Some(TRACE_ID));
    assert!(rendered.body.contains("The requested list does not exist."));
}

#[rstest]
#[actix_web::test]
async fn trace_header_is_omitted_without_trace_id() {
    let response = ResponseError::error_response(&Error::service_unavailable("down"));
    assert!(response.headers().get(TRACE_ID_HEADER).is_none());
    assert_eq!(
        response
            .headers()
            .get(actix_web::http::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
        Some("text/html; charset=utf-8")
    );
}
