//! Todo mutations within a list.
//!
//! ```text
//! POST /lists/{list_id}/todos                     add
//! POST /lists/{list_id}/todos/{todo_id}/delete    delete (XHR: 204)
//! POST /lists/{list_id}/todos/{todo_id}           set completion
//! POST /lists/{list_id}/complete_all              complete every todo
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, post, web};

use super::error::HttpResult;
use super::flash::{ALL_TODOS_COMPLETED, Flash, TODO_ADDED, TODO_DELETED, TODO_UPDATED};
use super::forms::{CompletedForm, TodoForm, parse_list_id};
use super::responses::{
    is_validation, is_xhr, list_path, path_list_id, path_todo_id, recover, see_other,
};
use super::store::ListStore;
use super::views::{html, list_page};
use crate::domain::{Error, sort_todos, todo_in_list};

/// Add a todo, or re-render the list with the validation message.
#[post("/lists/{list_id}/todos")]
pub async fn add_todo(
    store: ListStore,
    path: web::Path<String>,
    form: web::Form<TodoForm>,
) -> HttpResult<HttpResponse> {
    let outcome = async {
        let list_id = path_list_id(&path)?;
        match store.service().add_todo(list_id, &form.todo).await {
            Ok(_) => {
                store.commit()?;
                store.session().flash(&Flash::success(TODO_ADDED))?;
                Ok(see_other(&list_path(list_id)))
            }
            Err(error) if is_validation(&error) => {
                let list = store.service().list(list_id).await?;
                Ok(html(
                    StatusCode::UNPROCESSABLE_ENTITY,
                    list_page(
                        &list,
                        &sort_todos(list.todos()),
                        &form.todo,
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

/// Delete a todo. Script requests get `204 No Content` and no flash.
#[post("/lists/{list_id}/todos/{todo_id}/delete")]
pub async fn delete_todo(
    req: HttpRequest,
    store: ListStore,
    path: web::Path<(String, String)>,
) -> HttpResult<HttpResponse> {
    let (raw_list_id, raw_todo_id) = path.into_inner();
    let outcome = async {
        let list_id = path_list_id(&raw_list_id)?;
        let list = store.service().list(list_id).await?;
        let todo_id = path_todo_id(&raw_todo_id)?;
        todo_in_list(&list, todo_id)?;
        store.service().delete_todo(list_id, todo_id).await?;
        store.commit()?;
        if is_xhr(&req) {
            return Ok(HttpResponse::NoContent().finish());
        }
        store.session().flash(&Flash::success(TODO_DELETED))?;
        Ok::<_, Error>(see_other(&list_path(list_id)))
    }
    .await;
    recover(store.session(), outcome, parse_list_id(&raw_list_id))
}

/// Set a todo's completion flag from the `completed` form field.
#[post("/lists/{list_id}/todos/{todo_id}")]
pub async fn update_todo(
    store: ListStore,
    path: web::Path<(String, String)>,
    form: web::Form<CompletedForm>,
) -> HttpResult<HttpResponse> {
    let (raw_list_id, raw_todo_id) = path.into_inner();
    let outcome = async {
        let list_id = path_list_id(&raw_list_id)?;
        let list = store.service().list(list_id).await?;
        let todo_id = path_todo_id(&raw_todo_id)?;
        todo_in_list(&list, todo_id)?;
        store
            .service()
            .set_todo_completed(list_id, todo_id, form.is_completed())
            .await?;
        store.commit()?;
        store.session().flash(&Flash::success(TODO_UPDATED))?;
        Ok::<_, Error>(see_other(&list_path(list_id)))
    }
    .await;
    recover(store.session(), outcome, parse_list_id(&raw_list_id))
}

/// Mark every todo in a list as completed.
#[post("/lists/{list_id}/complete_all")]
pub async fn complete_all(store: ListStore, path: web::Path<String>) -> HttpResult<HttpResponse> {
    let outcome = async {
        let list_id = path_list_id(&path)?;
        store.service().complete_all(list_id).await?;
        store.commit()?;
        store.session().flash(&Flash::success(ALL_TODOS_COMPLETED))?;
        Ok::<_, Error>(see_other(&list_path(list_id)))
    }
    .await;
    recover(store.session(), outcome, None)
}

#[cfg(test)]
mod tests;
