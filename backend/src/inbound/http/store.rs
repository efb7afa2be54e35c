//! Per-request access to list storage.
//!
//! [`ListStore`] is extracted once per request. With the session backend it
//! loads the visitor's [`ListBook`](crate::domain::ListBook) from the session
//! into an in-memory repository; [`ListStore::commit`] writes it back after a
//! successful mutation. With a shared backend it simply borrows the
//! repository and `commit` does nothing.

use std::sync::Arc;

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use super::session::SessionContext;
use super::state::{HttpState, ListBackend};
use crate::domain::ports::{InMemoryListRepository, ListRepository};
use crate::domain::{Error, TodoListService};

enum Repository {
    Session(InMemoryListRepository),
    Shared(Arc<dyn ListRepository>),
}

/// Request-scoped list storage plus the session it was loaded from.
pub struct ListStore {
    repository: Repository,
    session: SessionContext,
}

impl ListStore {
    /// Use cases over this request's storage.
    pub fn service(&self) -> TodoListService<'_> {
        let repository: &dyn ListRepository = match &self.repository {
            Repository::Session(repository) => repository,
            Repository::Shared(repository) => repository.as_ref(),
        };
        TodoListService::new(repository)
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Persist session-held lists back into the session.
    pub fn commit(&self) -> Result<(), Error> {
        match &self.repository {
            Repository::Session(repository) => {
                let book = repository
                    .snapshot()
                    .map_err(|error| Error::internal(error.to_string()))?;
                debug!(lists = book.lists().len(), "storing list book in session");
                self.session.store_book(&book)
            }
            Repository::Shared(_) => Ok(()),
        }
    }
}

impl FromRequest for ListStore {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let backend = req
            .app_data::<web::Data<HttpState>>()
            .map(|state| state.lists.clone());
        let session = SessionContext::from_request(req, payload);
        Box::pin(async move {
            let session = session.await?;
            let backend =
                backend.ok_or_else(|| Error::internal("list storage is not configured"))?;
            let repository = match backend {
                ListBackend::Session => {
                    Repository::Session(InMemoryListRepository::new(session.load_book()))
                }
                ListBackend::Shared(repository) => Repository::Shared(repository),
            };
            Ok(Self {
                repository,
                session,
            })
        })
    }
}
