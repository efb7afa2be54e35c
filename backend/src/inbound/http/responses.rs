//! Response helpers shared by the list and todo handlers.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse};
use serde_json::json;

use super::error::HttpResult;
use super::flash::Flash;
use super::forms::{parse_list_id, parse_todo_id};
use super::session::SessionContext;
use crate::domain::{
    Error, ErrorCode, LIST_NOT_FOUND_MESSAGE, ListId, TODO_NOT_FOUND_MESSAGE, TodoId,
};

pub(crate) const LISTS_PATH: &str = "/lists";

const XHR_HEADER_VALUE: &str = "XMLHttpRequest";

/// `303 See Other` to `location`.
pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub(crate) fn list_path(id: ListId) -> String {
    format!("{LISTS_PATH}/{id}")
}

/// Whether the request came from script rather than a form submission.
pub(crate) fn is_xhr(req: &HttpRequest) -> bool {
    req.headers()
        .get("x-requested-with")
        .is_some_and(|value| value == XHR_HEADER_VALUE)
}

/// Parse a list id path segment, treating malformed ids as unknown lists.
pub(crate) fn path_list_id(raw: &str) -> Result<ListId, Error> {
    parse_list_id(raw).ok_or_else(|| {
        Error::not_found(LIST_NOT_FOUND_MESSAGE).with_details(json!({ "resource": "list" }))
    })
}

pub(crate) fn path_todo_id(raw: &str) -> Result<TodoId, Error> {
    parse_todo_id(raw).ok_or_else(|| {
        Error::not_found(TODO_NOT_FOUND_MESSAGE).with_details(json!({ "resource": "todo" }))
    })
}

/// Whether `error` is a rejected form value the handler should re-render.
pub(crate) fn is_validation(error: &Error) -> bool {
    error.code() == ErrorCode::InvalidRequest
}

/// Turn not-found failures into an error flash plus redirect.
///
/// Unknown lists redirect to the index; unknown todos redirect to their list
/// when `owning_list` is known. Other errors pass through untouched.
pub(crate) fn recover(
    session: &SessionContext,
    outcome: HttpResult<HttpResponse>,
    owning_list: Option<ListId>,
) -> HttpResult<HttpResponse> {
    match outcome {
        Err(error) if error.code() == ErrorCode::NotFound => {
            session.flash(&Flash::error(error.message()))?;
            let is_todo = error
                .details()
                .and_then(|details| details.get("resource"))
                .and_then(|resource| resource.as_str())
                == Some("todo");
            let location = match owning_list {
                Some(list_id) if is_todo => list_path(list_id),
                _ => LISTS_PATH.to_owned(),
            };
            Ok(see_other(&location))
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use rstest::rstest;

    #[rstest]
    #[case(Some("XMLHttpRequest"), true)]
    #[case(Some("fetch"), false)]
    #[case(None, false)]
    fn detects_script_requests(#[case] header_value: Option<&str>, #[case] expected: bool) {
        let mut request = TestRequest::post();
        if let Some(value) = header_value {
            request = request.insert_header(("X-Requested-With", value));
        }
        assert_eq!(is_xhr(&request.to_http_request()), expected);
    }

    #[rstest]
    fn see_other_sets_location() {
        let response = see_other("/lists/4");
        assert_eq!(response.status(), actix_web::http::StatusCode::SEE_OTHER);
        assert_eq!(
            response
                .headers()
                .get(header::LOCATION)
                .and_then(|value| value.to_str().ok()),
            Some("/lists/4")
        );
    }

    #[rstest]
    fn malformed_path_ids_are_not_found() {
        let error = path_list_id("x1").expect_err("malformed");
        assert_eq!(error.code(), ErrorCode::NotFound);
        assert_eq!(error.message(), LIST_NOT_FOUND_MESSAGE);
        assert_eq!(path_todo_id("9"), Ok(TodoId::new(9)));
    }
}
