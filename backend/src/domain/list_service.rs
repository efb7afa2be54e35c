//! List use cases.
//!
//! [`TodoListService`] trims and validates submitted names, delegates to a
//! [`ListRepository`] and translates port failures into domain [`Error`]s the
//! inbound adapter can render.

use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{ListRepository, ListRepositoryError};
use crate::domain::{
    Error, ListId, ListName, NameError, Todo, TodoId, TodoList, TodoName, find_todo,
    validate_list_name, validate_todo_name,
};

/// Flash shown when a list id does not resolve.
pub const LIST_NOT_FOUND_MESSAGE: &str = "The requested list does not exist.";
/// Flash shown when a todo id does not resolve.
pub const TODO_NOT_FOUND_MESSAGE: &str = "The requested todo does not exist.";

/// Use-case layer over a borrowed repository.
///
/// # Examples
/// ```
/// use todo_lists::domain::TodoListService;
/// use todo_lists::domain::ports::InMemoryListRepository;
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let repository = InMemoryListRepository::default();
/// let service = TodoListService::new(&repository);
/// let list = service.create_list("  Groceries ").await.expect("created");
/// assert_eq!(list.name().as_ref(), "Groceries");
/// # });
/// ```
#[derive(Clone, Copy)]
pub struct TodoListService<'a> {
    repository: &'a dyn ListRepository,
}

impl<'a> TodoListService<'a> {
    pub fn new(repository: &'a dyn ListRepository) -> Self {
        Self { repository }
    }

    /// All lists in creation order.
    pub async fn lists(&self) -> Result<Vec<TodoList>, Error> {
        self.repository.all_lists().await.map_err(map_repository_error)
    }

    /// One list by id.
    pub async fn list(&self, id: ListId) -> Result<TodoList, Error> {
        self.repository
            .find_list(id)
            .await
            .map_err(map_repository_error)
    }

    /// Create a list from a submitted name.
    pub async fn create_list(&self, submitted: &str) -> Result<TodoList, Error> {
        let existing = self.lists().await?;
        let name = list_name(submitted, &existing)?;
        let list = self
            .repository
            .create_list(&name)
            .await
            .map_err(map_repository_error)?;
        info!(list_id = %list.id(), "list created");
        Ok(list)
    }

    /// Rename a list.
    ///
    /// The new name is checked against every list, the renamed one included,
    /// so resubmitting the current name is rejected as not unique.
    pub async fn rename_list(&self, id: ListId, submitted: &str) -> Result<TodoList, Error> {
        self.list(id).await?;
        let existing = self.lists().await?;
        let name = list_name(submitted, &existing)?;
        let list = self
            .repository
            .rename_list(id, &name)
            .await
            .map_err(map_repository_error)?;
        info!(list_id = %id, "list renamed");
        Ok(list)
    }

    /// Delete a list and its todos.
    pub async fn delete_list(&self, id: ListId) -> Result<(), Error> {
        self.repository
            .delete_list(id)
            .await
            .map_err(map_repository_error)?;
        info!(list_id = %id, "list deleted");
        Ok(())
    }

    /// Add a todo to an existing list.
    pub async fn add_todo(&self, list_id: ListId, submitted: &str) -> Result<Todo, Error> {
        self.list(list_id).await?;
        let trimmed = submitted.trim();
        validate_todo_name(trimmed).map_err(name_error)?;
        let name = TodoName::new(trimmed).map_err(name_error)?;
        let todo = self
            .repository
            .create_todo(list_id, &name)
            .await
            .map_err(map_repository_error)?;
        info!(list_id = %list_id, todo_id = %todo.id, "todo added");
        Ok(todo)
    }

    pub async fn delete_todo(&self, list_id: ListId, todo_id: TodoId) -> Result<(), Error> {
        self.repository
            .delete_todo(list_id, todo_id)
            .await
            .map_err(map_repository_error)?;
        info!(list_id = %list_id, todo_id = %todo_id, "todo deleted");
        Ok(())
    }

    /// Set a todo's completion flag.
    pub async fn set_todo_completed(
        &self,
        list_id: ListId,
        todo_id: TodoId,
        completed: bool,
    ) -> Result<Todo, Error> {
        let todo = self
            .repository
            .set_todo_completed(list_id, todo_id, completed)
            .await
            .map_err(map_repository_error)?;
        debug!(list_id = %list_id, todo_id = %todo_id, completed, "todo updated");
        Ok(todo)
    }

    /// Mark every todo in a list as completed.
    pub async fn complete_all(&self, list_id: ListId) -> Result<TodoList, Error> {
        let list = self
            .repository
            .complete_all_todos(list_id)
            .await
            .map_err(map_repository_error)?;
        info!(list_id = %list_id, todos = list.todos_count(), "all todos completed");
        Ok(list)
    }
}

/// Resolve a todo inside an already loaded list.
///
/// An unknown id maps to the same not-found error the repository reports.
pub fn todo_in_list(list: &TodoList, todo_id: TodoId) -> Result<&Todo, Error> {
    find_todo(todo_id, list).map_err(|error| map_repository_error(error.into()))
}

fn list_name(submitted: &str, existing: &[TodoList]) -> Result<ListName, Error> {
    let trimmed = submitted.trim();
    validate_list_name(trimmed, existing).map_err(name_error)?;
    ListName::new(trimmed).map_err(name_error)
}

fn name_error(error: NameError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({ "field": error.field() }))
}

fn map_repository_error(error: ListRepositoryError) -> Error {
    match error {
        ListRepositoryError::ListNotFound { list_id } => Error::not_found(LIST_NOT_FOUND_MESSAGE)
            .with_details(json!({ "resource": "list", "listId": list_id })),
        ListRepositoryError::TodoNotFound { list_id, todo_id } => {
            Error::not_found(TODO_NOT_FOUND_MESSAGE).with_details(json!({
                "resource": "todo",
                "listId": list_id,
                "todoId": todo_id,
            }))
        }
        ListRepositoryError::DuplicateName { .. } => name_error(NameError::ListNameNotUnique),
        ListRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("list repository unavailable: {message}"))
        }
        ListRepositoryError::Query { message } => {
            Error::internal(format!("list repository error: {message}"))
        }
    }
}
