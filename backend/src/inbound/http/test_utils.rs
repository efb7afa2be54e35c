//! Test helpers for inbound HTTP components.

use actix_session::SessionMiddleware;
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::test::TestRequest;
use actix_web::{App, web};

use super::configure_routes;
use super::session_store::MemorySessionStore;
use super::state::HttpState;

/// Build a session middleware configured for tests.
///
/// Uses a fresh store and key per invocation and disables the `Secure` flag
/// so plain HTTP test requests carry the cookie.
pub fn test_session_middleware() -> SessionMiddleware<MemorySessionStore> {
    SessionMiddleware::builder(MemorySessionStore::new(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Every list and todo route over `state`, behind the test session.
pub fn routes_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(test_session_middleware())
        .app_data(web::Data::new(state))
        .configure(configure_routes)
}

/// The session cookie a response set, if any.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(|cookie| cookie.into_owned())
}

/// The `Location` header of a redirect.
pub fn location<B>(response: &ServiceResponse<B>) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

/// Carries the session cookie from one test request to the next.
#[derive(Default)]
pub struct CookieJar {
    cookie: Option<Cookie<'static>>,
}

impl CookieJar {
    /// Attach the remembered cookie to `request`.
    pub fn prepare(&self, request: TestRequest) -> TestRequest {
        match &self.cookie {
            Some(cookie) => request.cookie(cookie.clone()),
            None => request,
        }
    }

    /// Remember the cookie `response` set, keeping the old one otherwise.
    pub fn remember<B>(&mut self, response: &ServiceResponse<B>) {
        if let Some(cookie) = session_cookie(response) {
            self.cookie = Some(cookie);
        }
    }
}
