//! Shared HTTP adapter state.
//!
//! Handlers reach storage through [`HttpState`] (registered as
//! `actix_web::web::Data`) so they only depend on the domain port.

use std::sync::Arc;

use crate::domain::ports::ListRepository;

/// Where list data lives.
#[derive(Clone)]
pub enum ListBackend {
    /// Each visitor's lists live in their server-side session.
    Session,
    /// All visitors share one repository, such as PostgreSQL.
    Shared(Arc<dyn ListRepository>),
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub lists: ListBackend,
}

impl HttpState {
    /// State whose lists are stored in the visitor's session.
    ///
    /// # Examples
    /// ```
    /// use todo_lists::inbound::http::state::{HttpState, ListBackend};
    ///
    /// let state = HttpState::session_backed();
    /// assert!(matches!(state.lists, ListBackend::Session));
    /// ```
    pub fn session_backed() -> Self {
        Self {
            lists: ListBackend::Session,
        }
    }

    /// State whose lists live in `repository`.
    pub fn shared(repository: Arc<dyn ListRepository>) -> Self {
        Self {
            lists: ListBackend::Shared(repository),
        }
    }
}
