//! List pages and list mutations.
//!
//! ```text
//! GET  /                       -> 303 /lists
//! GET  /lists                  index, incomplete lists first
//! GET  /lists/new              new-list form
//! POST /lists                  create
//! GET  /lists/{list_id}        detail, incomplete todos first
//! GET  /lists/{list_id}/edit   rename form
//! POST /lists/{list_id}        rename
//! POST /lists/{list_id}/delete delete (XHR: 200 with the index path)
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, get, post, web};

use super::error::HttpResult;
use super::flash::{Flash, LIST_CREATED, LIST_DELETED, LIST_RENAMED};
use super::forms::ListNameForm;
use super::responses::{
    LISTS_PATH, is_validation, is_xhr, list_path, path_list_id, recover, see_other,
};
use super::session::SessionContext;
use super::store::ListStore;
use super::views::{edit_list_page, html, list_page, lists_page, new_list_page};
use crate::domain::{Error, sort_lists, sort_todos};

/// Redirect the bare root to the list index.
#[get("/")]
pub async fn root() -> HttpResponse {
    see_other(LISTS_PATH)
}

/// Render every list, incomplete ones first.
#[get("/lists")]
pub async fn index(store: ListStore) -> HttpResult<HttpResponse> {
    let lists = store.service().lists().await?;
    let flash = store.session().take_flash();
    Ok(html(
        StatusCode::OK,
        lists_page(&sort_lists(&lists), flash.as_ref()),
    ))
}

#[get("/lists/new")]
pub async fn new_list(session: SessionContext) -> HttpResponse {
    let flash = session.take_flash();
    html(StatusCode::OK, new_list_page("", flash.as_ref()))
}

/// Create a list, or re-render the form with the validation message.
#[post("/lists")]
pub async fn create_list(
    store: ListStore,
    form: web::Form<ListNameForm>,
) -> HttpResult<HttpResponse> {
    match store.service().create_list(&form.list_name).await {
        Ok(_) => {
            store.commit()?;
            store.session().flash(&Flash::success(LIST_CREATED))?;
            Ok(see_other(LISTS_PATH))
        }
        Err(error) if is_validation(&error) => Ok(html(
            StatusCode::UNPROCESSABLE_ENTITY,
            new_list_page(&form.list_name, Some(&Flash::error(error.message()))),
        )),
        Err(error) => Err(error),
    }
}

/// Render one list with its todos.
#[get("/lists/{list_id}")]
pub async fn show_list(store: ListStore, path: web::Path<String>) -> HttpResult<HttpResponse> {
    let outcome = async {
        let list = store.service().list(path_list_id(&path)?).await?;
        let flash = store.session().take_flash();
        Ok::<_, Error>(html(
            StatusCode::OK,
            list_page(&list, &sort_todos(list.todos()), "", flash.as_ref()),
        ))
    }
    .await;
    recover(store.session(), outcome, None)
}

#[get("/lists/{list_id}/edit")]
pub async fn edit_list(store: ListStore, path: web::Path<String>) -> HttpResult<HttpResponse> {
    let outcome = async {
        let list = store.service().list(path_list_id(&path)?).await?;
        let flash = store.session().take_flash();
        Ok::<_, Error>(html(
            StatusCode::OK,
            edit_list_page(&list, list.name().as_ref(), flash.as_ref()),
        ))
    }
    .await;
    recover(store.session(), outcome, None)
}

/// Rename a list, or re-render the edit form with the validation message.
#[post("/lists/{list_id}")]
pub async fn rename_list(
    store: ListStore,
    path: web::Path<String>,
    form: web::Form<ListNameForm>,
) -> HttpResult<HttpResponse> {
    let outcome = async {
        let list_id = path_list_id(&path)?;
        match store.service().rename_list(list_id, &form.list_name).await {
            Ok(_) => {
                store.commit()?;
                store.session().flash(&Flash::success(LIST_RENAMED))?;
                Ok(see_other(&list_path(list_id)))
            }
            Err(error) if is_validation(&error) => {
                let list = store.service().list(list_id).await?;
                Ok(html(
                    StatusCode::UNPROCESSABLE_ENTITY,
                    edit_list_page(
                        &list,
                        &form.list_name,
                        Some(&Flash::error(error.message())),
                    ),
                ))
            }
            Err(error) => Err(error),
        }
    }
    .await;
    recover(store.session(), outcome, None)
}

/// Delete a list and its todos.
///
/// Script requests get `200` with the index path as the body so the caller
/// can navigate there itself; no flash is queued for them.
#[post("/lists/{list_id}/delete")]
pub async fn delete_list(
    req: HttpRequest,
    store: ListStore,
    path: web::Path<String>,
) -> HttpResult<HttpResponse> {
    let outcome = async {
        store.service().delete_list(path_list_id(&path)?).await?;
        store.commit()?;
        if is_xhr(&req) {
            return Ok(HttpResponse::Ok().body(LISTS_PATH));
        }
        store.session().flash(&Flash::success(LIST_DELETED))?;
        Ok::<_, Error>(see_other(LISTS_PATH))
    }
    .await;
    recover(store.session(), outcome, None)
}
