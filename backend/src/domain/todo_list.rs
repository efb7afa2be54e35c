//! List and todo entities.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ids::{ListId, TodoId};
use super::validation::{NameError, has_valid_length};

macro_rules! define_name {
    ($(#[$meta:meta])* $name:ident, $error:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate the length of `name` and wrap it.
            pub fn new(name: impl Into<String>) -> Result<Self, NameError> {
                let name = name.into();
                if has_valid_length(&name) {
                    Ok(Self(name))
                } else {
                    Err($error)
                }
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = NameError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

define_name! {
    /// Name of a list: 1 to 100 characters.
    ListName, NameError::ListNameLength
}

define_name! {
    /// Name of a todo: 1 to 100 characters.
    TodoName, NameError::TodoNameLength
}

/// A completable work item belonging to one list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub name: TodoName,
    pub completed: bool,
}

impl Todo {
    /// Create an incomplete todo.
    #[must_use]
    pub fn new(id: TodoId, name: TodoName) -> Self {
        Self {
            id,
            name,
            completed: false,
        }
    }
}

/// A named, ordered collection of todos.
///
/// ## Invariants
/// - todo ids are unique within the list.
/// - todos keep insertion order; display ordering is applied separately by
///   [`crate::domain::sort_todos`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    id: ListId,
    name: ListName,
    todos: Vec<Todo>,
}

impl TodoList {
    /// Create an empty list.
    #[must_use]
    pub fn new(id: ListId, name: ListName) -> Self {
        Self {
            id,
            name,
            todos: Vec::new(),
        }
    }

    /// Rebuild a list from stored parts, keeping the first todo for any
    /// repeated id.
    #[must_use]
    pub fn from_parts(id: ListId, name: ListName, todos: Vec<Todo>) -> Self {
        let mut list = Self::new(id, name);
        for todo in todos {
            if list.find_todo(todo.id).is_none() {
                list.todos.push(todo);
            }
        }
        list
    }

    #[must_use]
    pub fn id(&self) -> ListId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &ListName {
        &self.name
    }

    /// Todos in insertion order.
    #[must_use]
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    #[must_use]
    pub fn todos_count(&self) -> usize {
        self.todos.len()
    }

    /// Number of todos not yet completed.
    #[must_use]
    pub fn todos_remaining_count(&self) -> usize {
        self.todos.iter().filter(|todo| !todo.completed).count()
    }

    /// A list is complete when it has at least one todo and none remain.
    ///
    /// # Examples
    /// ```
    /// use todo_lists::domain::{ListId, ListName, TodoList};
    ///
    /// let empty = TodoList::new(ListId::new(1), ListName::new("Chores").unwrap());
    /// assert!(!empty.is_complete());
    /// ```
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.todos_count() > 0 && self.todos_remaining_count() == 0
    }

    /// Look up a todo by id.
    #[must_use]
    pub fn find_todo(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    /// Largest todo id in the list, if any.
    pub(crate) fn max_todo_id(&self) -> Option<u32> {
        self.todos.iter().map(|todo| todo.id.get()).max()
    }

    pub(crate) fn rename(&mut self, name: ListName) {
        self.name = name;
    }

    pub(crate) fn push_todo(&mut self, todo: Todo) {
        self.todos.push(todo);
    }

    pub(crate) fn find_todo_mut(&mut self, id: TodoId) -> Option<&mut Todo> {
        self.todos.iter_mut().find(|todo| todo.id == id)
    }

    pub(crate) fn remove_todo(&mut self, id: TodoId) -> Option<Todo> {
        let index = self.todos.iter().position(|todo| todo.id == id)?;
        Some(self.todos.remove(index))
    }

    pub(crate) fn complete_all(&mut self) {
        for todo in &mut self.todos {
            todo.completed = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn todo(id: u32, name: &str, completed: bool) -> Todo {
        Todo {
            id: TodoId::new(id),
            name: TodoName::new(name).expect("valid todo name"),
            completed,
        }
    }

    #[fixture]
    fn chores() -> TodoList {
        TodoList::from_parts(
            ListId::new(1),
            ListName::new("Chores").expect("valid list name"),
            vec![todo(1, "x", false), todo(2, "y", true)],
        )
    }

    #[rstest]
    fn empty_list_is_not_complete() {
        let list = TodoList::new(ListId::new(1), ListName::new("Empty").expect("name"));
        assert!(!list.is_complete());
        assert_eq!(list.todos_remaining_count(), 0);
    }

    #[rstest]
    fn list_with_remaining_todos_is_not_complete(chores: TodoList) {
        assert!(!chores.is_complete());
        assert_eq!(chores.todos_count(), 2);
        assert_eq!(chores.todos_remaining_count(), 1);
    }

    #[rstest]
    fn complete_all_marks_every_todo(mut chores: TodoList) {
        chores.complete_all();
        let states: Vec<(&str, bool)> = chores
            .todos()
            .iter()
            .map(|todo| (todo.name.as_ref(), todo.completed))
            .collect();
        assert_eq!(states, vec![("x", true), ("y", true)]);
        assert!(chores.is_complete());
    }

    #[rstest]
    fn from_parts_drops_repeated_todo_ids() {
        let list = TodoList::from_parts(
            ListId::new(3),
            ListName::new("Dupes").expect("name"),
            vec![todo(1, "first", false), todo(1, "second", true)],
        );
        assert_eq!(list.todos_count(), 1);
        assert_eq!(list.todos()[0].name.as_ref(), "first");
    }

    #[rstest]
    fn names_reject_empty_and_oversized_values() {
        assert_eq!(ListName::new(""), Err(NameError::ListNameLength));
        assert_eq!(TodoName::new("z".repeat(101)), Err(NameError::TodoNameLength));
    }

    #[rstest]
    fn names_are_validated_on_deserialisation() {
        let result: Result<ListName, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
        let name: TodoName = serde_json::from_str("\"milk\"").expect("valid todo name");
        assert_eq!(name.as_ref(), "milk");
    }
}
