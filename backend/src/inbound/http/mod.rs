//! HTTP inbound adapter serving the server-rendered list pages.

pub mod error;
pub mod flash;
pub mod forms;
pub mod health;
pub mod lists;
mod responses;
pub mod session;
pub mod session_config;
pub mod session_store;
pub mod state;
pub mod store;
#[cfg(test)]
pub mod test_utils;
pub mod todos;
pub mod views;

use actix_web::web;

pub use error::HttpResult;

/// Register every page and form endpoint.
///
/// `/lists/new` is registered ahead of `/lists/{list_id}` so it is not
/// captured as a list id.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(lists::root)
        .service(lists::index)
        .service(lists::new_list)
        .service(lists::create_list)
        .service(lists::show_list)
        .service(lists::edit_list)
        .service(lists::rename_list)
        .service(lists::delete_list)
        .service(todos::add_todo)
        .service(todos::delete_todo)
        .service(todos::update_todo)
        .service(todos::complete_all);
}
