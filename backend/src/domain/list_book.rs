//! The complete collection of lists held by one store.
//!
//! A [`ListBook`] owns the id sequences for its lists and for the todos of
//! each list, so ids stay monotonic across deletions. The session-backed store
//! serialises the whole book (lists and sequences) into the visitor's session.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ids::{IdSequence, ListId, TodoId};
use super::lookup::{LookupError, find_list};
use super::todo_list::{ListName, Todo, TodoList, TodoName};

/// Failures raised by [`ListBook`] mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListBookError {
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error("list name `{0}` is already in use")]
    DuplicateName(ListName),
    #[error("no unused {0} ids remain")]
    IdsExhausted(&'static str),
}

/// Lists plus the sequences that number them.
///
/// # Examples
/// ```
/// use todo_lists::domain::{ListBook, ListName};
///
/// let mut book = ListBook::new();
/// let first = book.create_list(ListName::new("A").expect("name")).expect("created");
/// book.delete_list(first.id()).expect("deleted");
/// let second = book.create_list(ListName::new("B").expect("name")).expect("created");
/// assert!(second.id() > first.id());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ListBookSnapshot", into = "ListBookSnapshot")]
pub struct ListBook {
    lists: Vec<TodoList>,
    list_ids: IdSequence,
    todo_ids: BTreeMap<ListId, IdSequence>,
}

impl ListBook {
    /// An empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lists in creation order.
    #[must_use]
    pub fn lists(&self) -> &[TodoList] {
        &self.lists
    }

    /// Find a list by id.
    pub fn find_list(&self, id: ListId) -> Result<&TodoList, LookupError> {
        find_list(id, &self.lists)
    }

    /// Append a new, empty list.
    pub fn create_list(&mut self, name: ListName) -> Result<TodoList, ListBookError> {
        if self.name_in_use(&name, None) {
            return Err(ListBookError::DuplicateName(name));
        }
        let id = self
            .list_ids
            .issue()
            .ok_or(ListBookError::IdsExhausted("list"))?;
        let list = TodoList::new(ListId::new(id), name);
        self.todo_ids.insert(list.id(), IdSequence::new());
        self.lists.push(list.clone());
        Ok(list)
    }

    /// Rename a list. Another list may not already use `name`.
    pub fn rename_list(&mut self, id: ListId, name: ListName) -> Result<TodoList, ListBookError> {
        if self.name_in_use(&name, Some(id)) {
            return Err(ListBookError::DuplicateName(name));
        }
        let list = list_mut(&mut self.lists, id)?;
        list.rename(name);
        Ok(list.clone())
    }

    /// Remove a list together with all of its todos.
    pub fn delete_list(&mut self, id: ListId) -> Result<TodoList, ListBookError> {
        let index = self
            .lists
            .iter()
            .position(|list| list.id() == id)
            .ok_or(LookupError::ListNotFound(id))?;
        // The list id stays retired, so its todo sequence is no longer needed.
        self.todo_ids.remove(&id);
        Ok(self.lists.remove(index))
    }

    /// Append an incomplete todo to a list.
    pub fn add_todo(&mut self, list_id: ListId, name: TodoName) -> Result<Todo, ListBookError> {
        let list = list_mut(&mut self.lists, list_id)?;
        let sequence = self
            .todo_ids
            .entry(list_id)
            .or_insert_with(|| IdSequence::following(list.max_todo_id()));
        let id = sequence
            .issue()
            .ok_or(ListBookError::IdsExhausted("todo"))?;
        let todo = Todo::new(TodoId::new(id), name);
        list.push_todo(todo.clone());
        Ok(todo)
    }

    /// Remove a todo from a list.
    pub fn delete_todo(&mut self, list_id: ListId, todo_id: TodoId) -> Result<Todo, ListBookError> {
        let list = list_mut(&mut self.lists, list_id)?;
        list.remove_todo(todo_id)
            .ok_or(ListBookError::Lookup(LookupError::TodoNotFound { list_id, todo_id }))
    }

    /// Set a todo's completion flag.
    pub fn set_todo_completed(
        &mut self,
        list_id: ListId,
        todo_id: TodoId,
        completed: bool,
    ) -> Result<Todo, ListBookError> {
        let list = list_mut(&mut self.lists, list_id)?;
        let todo = list
            .find_todo_mut(todo_id)
            .ok_or(LookupError::TodoNotFound { list_id, todo_id })?;
        todo.completed = completed;
        Ok(todo.clone())
    }

    /// Mark every todo in a list as completed.
    pub fn complete_all(&mut self, list_id: ListId) -> Result<TodoList, ListBookError> {
        let list = list_mut(&mut self.lists, list_id)?;
        list.complete_all();
        Ok(list.clone())
    }

    fn name_in_use(&self, name: &ListName, except: Option<ListId>) -> bool {
        self.lists
            .iter()
            .any(|list| list.name() == name && Some(list.id()) != except)
    }
}

fn list_mut(lists: &mut [TodoList], id: ListId) -> Result<&mut TodoList, LookupError> {
    lists
        .iter_mut()
        .find(|list| list.id() == id)
        .ok_or(LookupError::ListNotFound(id))
}

/// Serialised form of a [`ListBook`].
///
/// Sequence positions are optional so books stored without them still load;
/// missing or stale positions are repaired from the ids present. Positions
/// are wide enough to record an exhausted sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListBookSnapshot {
    lists: Vec<TodoList>,
    #[serde(default)]
    next_list_id: Option<u64>,
    #[serde(default)]
    next_todo_ids: BTreeMap<u32, u64>,
}

/// One past the last id `sequence` can no longer issue.
fn stored_next(sequence: &IdSequence) -> u64 {
    sequence
        .peek()
        .map_or(u64::from(u32::MAX) + 1, u64::from)
}

fn last_issued(next: u64) -> Option<u32> {
    next.checked_sub(1)
        .and_then(|last| u32::try_from(last).ok())
}

impl From<ListBook> for ListBookSnapshot {
    fn from(book: ListBook) -> Self {
        Self {
            next_list_id: Some(stored_next(&book.list_ids)),
            next_todo_ids: book
                .todo_ids
                .iter()
                .map(|(id, sequence)| (id.get(), stored_next(sequence)))
                .collect(),
            lists: book.lists,
        }
    }
}

impl From<ListBookSnapshot> for ListBook {
    fn from(snapshot: ListBookSnapshot) -> Self {
        let ListBookSnapshot {
            lists: stored,
            next_list_id,
            next_todo_ids,
        } = snapshot;

        let mut lists: Vec<TodoList> = Vec::with_capacity(stored.len());
        for list in stored {
            if lists.iter().all(|kept| kept.id() != list.id()) {
                lists.push(list);
            }
        }

        let list_ids = IdSequence::following(
            lists
                .iter()
                .map(|list| list.id().get())
                .chain(next_list_id.and_then(last_issued)),
        );
        let todo_ids = lists
            .iter()
            .map(|list| {
                let stored_next = next_todo_ids
                    .get(&list.id().get())
                    .copied()
                    .and_then(last_issued);
                let sequence = IdSequence::following(
                    list.todos()
                        .iter()
                        .map(|todo| todo.id.get())
                        .chain(stored_next),
                );
                (list.id(), sequence)
            })
            .collect();

        Self {
            lists,
            list_ids,
            todo_ids,
        }
    }
}
