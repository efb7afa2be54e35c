//! Lookup by id.

use super::ids::{ListId, TodoId};
use super::todo_list::{Todo, TodoList};

/// An id that does not resolve to a stored list or todo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("list {0} does not exist")]
    ListNotFound(ListId),
    #[error("todo {todo_id} does not exist in list {list_id}")]
    TodoNotFound { list_id: ListId, todo_id: TodoId },
}

/// Find the list with `id`.
pub fn find_list(id: ListId, lists: &[TodoList]) -> Result<&TodoList, LookupError> {
    lists
        .iter()
        .find(|list| list.id() == id)
        .ok_or(LookupError::ListNotFound(id))
}

/// Find the todo with `id` inside `list`.
pub fn find_todo(id: TodoId, list: &TodoList) -> Result<&Todo, LookupError> {
    list.find_todo(id).ok_or(LookupError::TodoNotFound {
        list_id: list.id(),
        todo_id: id,
    })
}
