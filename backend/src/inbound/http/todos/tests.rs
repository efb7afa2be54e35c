//! Handler tests for todo mutations.

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use rstest::rstest;

use crate::inbound::http::flash::{ALL_TODOS_COMPLETED, TODO_ADDED, TODO_DELETED, TODO_UPDATED};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::test_utils::{CookieJar, location, routes_app};

fn form_post(uri: &str, body: &str) -> TestRequest {
    TestRequest::post()
        .uri(uri)
        .insert_header(("content-type", "application/x-www-form-urlencoded"))
        .set_payload(body.to_owned())
}

async fn body_text<B>(res: actix_web::dev::ServiceResponse<B>) -> String
where
    B: actix_web::body::MessageBody,
{
    String::from_utf8(test::read_body(res).await.to_vec()).expect("utf-8 body")
}

/// Send `$request` with the jar's cookie and remember any replacement.
macro_rules! visit {
    ($app:expr, $jar:expr, $request:expr) => {{
        let res = test::call_service(&$app, $jar.prepare($request).to_request()).await;
        $jar.remember(&res);
        res
    }};
}

#[actix_web::test]
async fn added_todo_is_listed_with_a_flash() {
    let app = test::init_service(routes_app(HttpState::session_backed())).await;
    let mut jar = CookieJar::default();
    visit!(app, jar, form_post("/lists", "list_name=Groceries"));

    let added = visit!(app, jar, form_post("/lists/1/todos", "todo=+Milk+"));
    assert_eq!(added.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&added).as_deref(), Some("/lists/1"));

    let page = visit!(app, jar, TestRequest::get().uri("/lists/1"));
    let body = body_text(page).await;
    assert!(body.contains("<h3>Milk</h3>"));
    assert!(body.contains("action=\"/lists/1/todos/1\""));
    assert!(body.contains("<p>1 / 1</p>"));
    assert!(body.contains(TODO_ADDED));
}

#[rstest]
#[case("todo=")]
#[case("todo=++")]
#[actix_web::test]
async fn invalid_todo_re_renders_the_list(#[case] form: &str) {
    let app = test::init_service(routes_app(HttpState::session_backed())).await;
    let mut jar = CookieJar::default();
    visit!(app, jar, form_post("/lists", "list_name=Groceries"));

    let res = visit!(app, jar, form_post("/lists/1/todos", form));
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_text(res).await;
    assert!(body.contains("Todo must be between 1 and 100 characters."));
    assert!(body.contains("<h2>Groceries</h2>"));
}

#[actix_web::test]
async fn adding_to_an_unknown_list_redirects_to_the_index() {
    let app = test::init_service(routes_app(HttpState::session_backed())).await;
    let res = test::call_service(&app, form_post("/lists/3/todos", "todo=Milk").to_request()).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res).as_deref(), Some("/lists"));
}

#[actix_web::test]
async fn toggling_a_todo_updates_the_counts() {
    let app = test::init_service(routes_app(HttpState::session_backed())).await;
    let mut jar = CookieJar::default();
    visit!(app, jar, form_post("/lists", "list_name=Groceries"));
    visit!(app, jar, form_post("/lists/1/todos", "todo=Milk"));
    visit!(app, jar, form_post("/lists/1/todos", "todo=Eggs"));

    let checked = visit!(app, jar, form_post("/lists/1/todos/2", "completed=true"));
    assert_eq!(checked.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&checked).as_deref(), Some("/lists/1"));

    let page = visit!(app, jar, TestRequest::get().uri("/lists/1"));
    let body = body_text(page).await;
    assert!(body.contains("<p>1 / 2</p>"));
    assert!(body.contains(TODO_UPDATED));
    let milk = body.find("<h3>Milk</h3>").expect("milk listed");
    let eggs = body.find("<h3>Eggs</h3>").expect("eggs listed");
    assert!(milk < eggs, "incomplete todos come first");

    visit!(app, jar, form_post("/lists/1/todos/2", "completed=false"));
    let page = visit!(app, jar, TestRequest::get().uri("/lists/1"));
    assert!(body_text(page).await.contains("<p>2 / 2</p>"));
}

#[actix_web::test]
async fn complete_all_marks_the_list_done() {
    let app = test::init_service(routes_app(HttpState::session_backed())).await;
    let mut jar = CookieJar::default();
    visit!(app, jar, form_post("/lists", "list_name=Groceries"));
    visit!(app, jar, form_post("/lists/1/todos", "todo=Milk"));
    visit!(app, jar, form_post("/lists/1/todos", "todo=Eggs"));

    let res = visit!(app, jar, form_post("/lists/1/complete_all", ""));
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res).as_deref(), Some("/lists/1"));

    let page = visit!(app, jar, TestRequest::get().uri("/lists/1"));
    let body = body_text(page).await;
    assert!(body.contains("<p>0 / 2</p>"));
    assert!(body.contains("class=\"complete\""));
    assert!(body.contains(ALL_TODOS_COMPLETED));
}

#[rstest]
#[case(false)]
#[case(true)]
#[actix_web::test]
async fn delete_removes_the_todo(#[case] xhr: bool) {
    let app = test::init_service(routes_app(HttpState::session_backed())).await;
    let mut jar = CookieJar::default();
    visit!(app, jar, form_post("/lists", "list_name=Groceries"));
    visit!(app, jar, form_post("/lists/1/todos", "todo=Milk"));

    let mut request = form_post("/lists/1/todos/1/delete", "");
    if xhr {
        request = request.insert_header(("X-Requested-With", "XMLHttpRequest"));
    }
    let deleted = visit!(app, jar, request);
    if xhr {
        assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
    } else {
        assert_eq!(deleted.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&deleted).as_deref(), Some("/lists/1"));
    }

    let page = visit!(app, jar, TestRequest::get().uri("/lists/1"));
    let body = body_text(page).await;
    assert!(!body.contains("<h3>Milk</h3>"));
    assert_eq!(body.contains(TODO_DELETED), !xhr);
}

#[rstest]
#[case("/lists/1/todos/9/delete", "")]
#[case("/lists/1/todos/x/delete", "")]
#[case("/lists/1/todos/9", "completed=true")]
#[actix_web::test]
async fn unknown_todos_redirect_to_their_list(#[case] uri: &str, #[case] form: &str) {
    let app = test::init_service(routes_app(HttpState::session_backed())).await;
    let mut jar = CookieJar::default();
    visit!(app, jar, form_post("/lists", "list_name=Groceries"));

    let res = visit!(app, jar, form_post(uri, form));
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res).as_deref(), Some("/lists/1"));

    let page = visit!(app, jar, TestRequest::get().uri("/lists/1"));
    assert!(
        body_text(page)
            .await
            .contains("The requested todo does not exist.")
    );
}

#[actix_web::test]
async fn todos_in_unknown_lists_redirect_to_the_index() {
    let app = test::init_service(routes_app(HttpState::session_backed())).await;
    let res = test::call_service(
        &app,
        form_post("/lists/4/todos/1", "completed=true").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res).as_deref(), Some("/lists"));
}
