//! Port for list and todo persistence.
//!
//! [`ListRepository`] is the storage contract behind every list operation.
//! The Diesel adapter stores lists in PostgreSQL; [`InMemoryListRepository`]
//! wraps a [`ListBook`] and backs both the session store and unit tests.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::{
    ListBook, ListBookError, ListId, ListName, LookupError, Todo, TodoId, TodoList, TodoName,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by list repository adapters.
    pub enum ListRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "list repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "list repository query failed: {message}",
        /// No list has the requested id.
        ListNotFound { list_id: u32 } =>
            "list {list_id} does not exist",
        /// The list exists but holds no todo with the requested id.
        TodoNotFound { list_id: u32, todo_id: u32 } =>
            "todo {todo_id} does not exist in list {list_id}",
        /// Another list already uses the name.
        DuplicateName { name: String } =>
            "list name `{name}` is already in use",
    }
}

impl From<LookupError> for ListRepositoryError {
    fn from(error: LookupError) -> Self {
        match error {
            LookupError::ListNotFound(list_id) => Self::list_not_found(list_id.get()),
            LookupError::TodoNotFound { list_id, todo_id } => {
                Self::todo_not_found(list_id.get(), todo_id.get())
            }
        }
    }
}

impl From<ListBookError> for ListRepositoryError {
    fn from(error: ListBookError) -> Self {
        match error {
            ListBookError::Lookup(lookup) => lookup.into(),
            ListBookError::DuplicateName(name) => Self::duplicate_name(name),
            exhausted @ ListBookError::IdsExhausted(_) => Self::query(exhausted.to_string()),
        }
    }
}

/// Port for list storage.
///
/// Every method returns a snapshot of the state after the call; callers never
/// hold references into the store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListRepository: Send + Sync {
    /// All lists in creation order.
    async fn all_lists(&self) -> Result<Vec<TodoList>, ListRepositoryError>;

    /// Fetch one list with its todos.
    async fn find_list(&self, id: ListId) -> Result<TodoList, ListRepositoryError>;

    /// Store a new, empty list and return it with its assigned id.
    async fn create_list(&self, name: &ListName) -> Result<TodoList, ListRepositoryError>;

    async fn rename_list(
        &self,
        id: ListId,
        name: &ListName,
    ) -> Result<TodoList, ListRepositoryError>;

    /// Remove a list and all of its todos.
    async fn delete_list(&self, id: ListId) -> Result<(), ListRepositoryError>;

    /// Append an incomplete todo to a list.
    async fn create_todo(
        &self,
        list_id: ListId,
        name: &TodoName,
    ) -> Result<Todo, ListRepositoryError>;

    async fn delete_todo(
        &self,
        list_id: ListId,
        todo_id: TodoId,
    ) -> Result<(), ListRepositoryError>;

    /// Set a todo's completion flag to `completed`.
    async fn set_todo_completed(
        &self,
        list_id: ListId,
        todo_id: TodoId,
        completed: bool,
    ) -> Result<Todo, ListRepositoryError>;

    /// Mark every todo in a list as completed.
    async fn complete_all_todos(&self, list_id: ListId) -> Result<TodoList, ListRepositoryError>;
}

/// Repository over an in-process [`ListBook`].
///
/// # Examples
/// ```
/// use todo_lists::domain::ListBook;
/// use todo_lists::domain::ports::InMemoryListRepository;
///
/// let repository = InMemoryListRepository::new(ListBook::new());
/// assert!(repository.snapshot().expect("unpoisoned").lists().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryListRepository {
    book: Mutex<ListBook>,
}

impl InMemoryListRepository {
    #[must_use]
    pub fn new(book: ListBook) -> Self {
        Self {
            book: Mutex::new(book),
        }
    }

    /// Copy of the current book.
    pub fn snapshot(&self) -> Result<ListBook, ListRepositoryError> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, ListBook>, ListRepositoryError> {
        self.book
            .lock()
            .map_err(|_| ListRepositoryError::query("list book lock poisoned"))
    }
}

#[async_trait]
impl ListRepository for InMemoryListRepository {
    async fn all_lists(&self) -> Result<Vec<TodoList>, ListRepositoryError> {
        Ok(self.lock()?.lists().to_vec())
    }

    async fn find_list(&self, id: ListId) -> Result<TodoList, ListRepositoryError> {
        Ok(self.lock()?.find_list(id)?.clone())
    }

    async fn create_list(&self, name: &ListName) -> Result<TodoList, ListRepositoryError> {
        Ok(self.lock()?.create_list(name.clone())?)
    }

    async fn rename_list(
        &self,
        id: ListId,
        name: &ListName,
    ) -> Result<TodoList, ListRepositoryError> {
        Ok(self.lock()?.rename_list(id, name.clone())?)
    }

    async fn delete_list(&self, id: ListId) -> Result<(), ListRepositoryError> {
        self.lock()?.delete_list(id)?;
        Ok(())
    }

    async fn create_todo(
        &self,
        list_id: ListId,
        name: &TodoName,
    ) -> Result<Todo, ListRepositoryError> {
        Ok(self.lock()?.add_todo(list_id, name.clone())?)
    }

    async fn delete_todo(
        &self,
        list_id: ListId,
        todo_id: TodoId,
    ) -> Result<(), ListRepositoryError> {
        self.lock()?.delete_todo(list_id, todo_id)?;
        Ok(())
    }

    async fn set_todo_completed(
        &self,
        list_id: ListId,
        todo_id: TodoId,
        completed: bool,
    ) -> Result<Todo, ListRepositoryError> {
        Ok(self
            .lock()?
            .set_todo_completed(list_id, todo_id, completed)?)
    }

    async fn complete_all_todos(&self, list_id: ListId) -> Result<TodoList, ListRepositoryError> {
        Ok(self.lock()?.complete_all(list_id)?)
    }
}
