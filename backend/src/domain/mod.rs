//! Domain entities, validation and use cases.
//!
//! Public surface:
//! - `TodoList`, `Todo` with validated `ListName`/`TodoName` and
//!   `ListId`/`TodoId` identifiers.
//! - `ListBook`: every list held by one store plus its id sequences.
//! - `TodoListService`: validating use-case layer over the
//!   [`ports::ListRepository`] port.
//! - `Error`/`ErrorCode`: transport agnostic failures.

pub mod display;
pub mod error;
pub mod ids;
pub mod list_book;
pub mod list_service;
pub mod lookup;
pub mod ports;
pub mod todo_list;
pub mod trace_id;
pub mod validation;

pub use self::display::{partition_for_display, sort_lists, sort_todos};
pub use self::error::{Error, ErrorCode};
pub use self::ids::{IdSequence, ListId, TodoId};
pub use self::list_book::{ListBook, ListBookError};
pub use self::list_service::{
    LIST_NOT_FOUND_MESSAGE, TODO_NOT_FOUND_MESSAGE, TodoListService, todo_in_list,
};
pub use self::lookup::{LookupError, find_list, find_todo};
pub use self::todo_list::{ListName, Todo, TodoList, TodoName};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::validation::{
    NAME_MAX_CHARS, NAME_MIN_CHARS, NameError, validate_list_name, validate_todo_name,
};
