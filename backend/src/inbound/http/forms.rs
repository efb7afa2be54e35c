//! Form payloads and path parsing for list routes.

use serde::Deserialize;

use crate::domain::{ListId, TodoId};

/// Payload for creating or renaming a list.
#[derive(Debug, Default, Deserialize)]
pub struct ListNameForm {
    #[serde(default)]
    pub list_name: String,
}

/// Payload for adding a todo.
#[derive(Debug, Default, Deserialize)]
pub struct TodoForm {
    #[serde(default)]
    pub todo: String,
}

/// Payload for toggling a todo. Only the literal `"true"` marks it complete.
#[derive(Debug, Default, Deserialize)]
pub struct CompletedForm {
    #[serde(default)]
    pub completed: Option<String>,
}

impl CompletedForm {
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed.as_deref() == Some("true")
    }
}

/// Parse a list id path segment. Anything that is not a valid id is treated
/// as an id that does not exist.
pub(crate) fn parse_list_id(raw: &str) -> Option<ListId> {
    raw.parse().ok()
}

pub(crate) fn parse_todo_id(raw: &str) -> Option<TodoId> {
    raw.parse().ok()
}
