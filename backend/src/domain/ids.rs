//! Identifiers for lists and todos plus the monotonic sequence that issues
//! them.
//!
//! Ids are never reused: a sequence only moves forwards, so deleting the list
//! or todo holding the highest id does not hand that id out again.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Wrap a raw identifier.
            #[must_use]
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            /// Return the raw identifier.
            #[must_use]
            pub const fn get(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse().map(Self)
            }
        }
    };
}

define_id! {
    /// Identifier of a list, unique across the list book.
    ListId
}

define_id! {
    /// Identifier of a todo, unique within its list.
    TodoId
}

/// Monotonic id counter.
///
/// ## Invariants
/// - `next` is always greater than every id the sequence has issued or
///   observed.
/// - Once `u32::MAX` has been issued or observed the sequence is exhausted
///   and issues nothing further.
///
/// # Examples
/// ```
/// use todo_lists::domain::IdSequence;
///
/// let mut ids = IdSequence::following([3, 7, 5]);
/// assert_eq!(ids.issue(), Some(8));
/// assert_eq!(ids.issue(), Some(9));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdSequence {
    next: Option<u32>,
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSequence {
    /// A sequence for an empty collection; the first id issued is 1.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: Some(1) }
    }

    /// A sequence positioned after the largest of `existing`.
    pub fn following(existing: impl IntoIterator<Item = u32>) -> Self {
        let mut sequence = Self::new();
        for id in existing {
            sequence.observe(id);
        }
        sequence
    }

    /// Peek at the id the next call to [`IdSequence::issue`] returns.
    #[must_use]
    pub const fn peek(&self) -> Option<u32> {
        self.next
    }

    /// Hand out the next id and advance, or `None` once exhausted.
    pub fn issue(&mut self) -> Option<u32> {
        let id = self.next?;
        self.next = id.checked_add(1);
        Some(id)
    }

    /// Make sure `id` will never be issued, advancing past it if required.
    pub fn observe(&mut self, id: u32) {
        if self.next.is_some_and(|next| id >= next) {
            self.next = id.checked_add(1);
        }
    }
}
