//! One-shot status messages shown on the next rendered page.

pub const LIST_CREATED: &str = "The list has been created.";
pub const LIST_RENAMED: &str = "The list name has been updated.";
pub const LIST_DELETED: &str = "The list has been deleted.";
pub const TODO_ADDED: &str = "The todo has been added.";
pub const TODO_DELETED: &str = "Todo has been deleted.";
pub const TODO_UPDATED: &str = "Todo item has been updated.";
pub const ALL_TODOS_COMPLETED: &str = "All todo items have been completed.";

/// Whether a flash reports success or failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
}

impl FlashKind {
    /// Session key the message is stored under.
    pub(crate) const fn session_key(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    /// CSS class used when rendering the message.
    pub(crate) const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "flash success",
            Self::Error => "flash error",
        }
    }
}

/// A status message awaiting display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }
}
