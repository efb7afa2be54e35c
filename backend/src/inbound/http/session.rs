//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps the Actix session so handlers only deal with flashes and, for the
//! session-backed store, the serialised [`ListBook`].

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use super::flash::{Flash, FlashKind};
use crate::domain::{Error, ListBook};

pub(crate) const LISTS_KEY: &str = "lists";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Queue a flash for the next rendered page, replacing any pending flash
    /// of the same kind.
    pub fn flash(&self, flash: &Flash) -> Result<(), Error> {
        self.0
            .insert(flash.kind.session_key(), flash.message.as_str())
            .map_err(|error| Error::internal(format!("failed to persist flash: {error}")))
    }

    /// Remove and return the pending flash. Errors win over successes; both
    /// keys are cleared.
    pub fn take_flash(&self) -> Option<Flash> {
        let error = self.take_message(FlashKind::Error);
        let success = self.take_message(FlashKind::Success);
        error.map(Flash::error).or_else(|| success.map(Flash::success))
    }

    /// The list book stored in the session, or an empty one.
    ///
    /// A value that no longer deserialises is discarded rather than failing
    /// every request in the session.
    pub fn load_book(&self) -> ListBook {
        match self.0.get::<ListBook>(LISTS_KEY) {
            Ok(book) => book.unwrap_or_default(),
            Err(error) => {
                warn!(%error, "discarding unreadable list book from session");
                self.0.remove(LISTS_KEY);
                ListBook::new()
            }
        }
    }

    /// Persist `book` into the session.
    pub fn store_book(&self, book: &ListBook) -> Result<(), Error> {
        self.0
            .insert(LISTS_KEY, book)
            .map_err(|error| Error::internal(format!("failed to persist lists: {error}")))
    }

    fn take_message(&self, kind: FlashKind) -> Option<String> {
        match self.0.remove_as::<String>(kind.session_key()) {
            Some(Ok(message)) => Some(message),
            Some(Err(raw)) => {
                warn!(key = kind.session_key(), raw = %raw, "dropping malformed flash");
                None
            }
            None => None,
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ListName;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    fn session_test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().wrap(crate::inbound::http::test_utils::test_session_middleware())
    }

    #[actix_web::test]
    async fn flash_is_shown_once() {
        let app = test::init_service(
            session_test_app()
                .route(
                    "/set",
                    web::get().to(|session: SessionContext| async move {
                        session.flash(&Flash::success("saved"))?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/take",
                    web::get().to(|session: SessionContext| async move {
                        let message = session
                            .take_flash()
                            .map(|flash| flash.message)
                            .unwrap_or_default();
                        HttpResponse::Ok().body(message)
                    }),
                ),
        )
        .await;

        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        assert_eq!(set_res.status(), StatusCode::OK);
        let cookie = set_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned();

        let first = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/take")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        let updated = first
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .map(|cookie| cookie.into_owned());
        assert_eq!(test::read_body(first).await, "saved");

        let mut request = test::TestRequest::get().uri("/take");
        if let Some(cookie) = updated {
            request = request.cookie(cookie);
        }
        let second = test::call_service(&app, request.to_request()).await;
        assert_eq!(test::read_body(second).await, "");
    }

    #[actix_web::test]
    async fn book_round_trips_through_the_session() {
        let app = test::init_service(
            session_test_app()
                .route(
                    "/store",
                    web::get().to(|session: SessionContext| async move {
                        let mut book = ListBook::new();
                        book.create_list(ListName::new("Work").expect("name"))
                            .map_err(|error| Error::internal(error.to_string()))?;
                        session.store_book(&book)?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/load",
                    web::get().to(|session: SessionContext| async move {
                        let book = session.load_book();
                        let names: Vec<String> =
                            book.lists().iter().map(|l| l.name().to_string()).collect();
                        HttpResponse::Ok().body(names.join(","))
                    }),
                ),
        )
        .await;

        let store_res =
            test::call_service(&app, test::TestRequest::get().uri("/store").to_request()).await;
        let cookie = store_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned();

        let load_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/load")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(test::read_body(load_res).await, "Work");
    }

    #[actix_web::test]
    async fn missing_book_loads_empty() {
        let app = test::init_service(session_test_app().route(
            "/load",
            web::get().to(|session: SessionContext| async move {
                HttpResponse::Ok().body(session.load_book().lists().len().to_string())
            }),
        ))
        .await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/load").to_request()).await;
        assert_eq!(test::read_body(res).await, "0");
    }
}
