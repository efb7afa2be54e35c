//! Name validation for lists and todos.
//!
//! Lengths are counted in characters, not bytes. Callers trim surrounding
//! whitespace before validating; these functions check the value as given.

use std::fmt;

use super::todo_list::TodoList;

/// Shortest accepted list or todo name, in characters.
pub const NAME_MIN_CHARS: usize = 1;
/// Longest accepted list or todo name, in characters.
pub const NAME_MAX_CHARS: usize = 100;

/// Why a submitted name was rejected.
///
/// The `Display` output is the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameError {
    ListNameLength,
    ListNameNotUnique,
    TodoNameLength,
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ListNameLength => write!(
                f,
                "List name must be between {NAME_MIN_CHARS} and {NAME_MAX_CHARS} characters."
            ),
            Self::ListNameNotUnique => write!(f, "List name must be unique."),
            Self::TodoNameLength => write!(
                f,
                "Todo must be between {NAME_MIN_CHARS} and {NAME_MAX_CHARS} characters."
            ),
        }
    }
}

impl std::error::Error for NameError {}

impl NameError {
    /// Form field the error relates to.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::ListNameLength | Self::ListNameNotUnique => "list_name",
            Self::TodoNameLength => "todo",
        }
    }
}

pub(crate) fn has_valid_length(name: &str) -> bool {
    (NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&name.chars().count())
}

/// Check a list name against the length bounds and the names already in use.
///
/// Comparison is case-sensitive: "Groceries" and "groceries" may coexist.
///
/// # Examples
/// ```
/// use todo_lists::domain::{validate_list_name, NameError};
///
/// assert_eq!(validate_list_name("", &[]), Err(NameError::ListNameLength));
/// assert_eq!(validate_list_name("Chores", &[]), Ok(()));
/// ```
pub fn validate_list_name(name: &str, existing: &[TodoList]) -> Result<(), NameError> {
    if !has_valid_length(name) {
        return Err(NameError::ListNameLength);
    }
    if existing.iter().any(|list| list.name().as_ref() == name) {
        return Err(NameError::ListNameNotUnique);
    }
    Ok(())
}

/// Check a todo name against the length bounds.
pub fn validate_todo_name(name: &str) -> Result<(), NameError> {
    if has_valid_length(name) {
        Ok(())
    } else {
        Err(NameError::TodoNameLength)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ListId, ListName};
    use rstest::rstest;

    fn list(id: u32, name: &str) -> TodoList {
        TodoList::new(ListId::new(id), ListName::new(name).expect("valid name"))
    }

    #[rstest]
    #[case("", Err(NameError::ListNameLength))]
    #[case("a", Ok(()))]
    #[case(&"x".repeat(100), Ok(()))]
    #[case(&"x".repeat(101), Err(NameError::ListNameLength))]
    fn list_name_length_bounds(#[case] name: &str, #[case] expected: Result<(), NameError>) {
        assert_eq!(validate_list_name(name, &[]), expected);
    }

    #[rstest]
    fn length_counts_characters_not_bytes() {
        let name = "é".repeat(100);
        assert!(name.len() > NAME_MAX_CHARS);
        assert_eq!(validate_list_name(&name, &[]), Ok(()));
        assert_eq!(validate_todo_name(&name), Ok(()));
    }

    #[rstest]
    fn duplicate_list_name_is_rejected() {
        let existing = [list(1, "A")];
        let err = validate_list_name("A", &existing).expect_err("duplicate");
        assert_eq!(err, NameError::ListNameNotUnique);
        assert_eq!(err.to_string(), "List name must be unique.");
    }

    #[rstest]
    fn uniqueness_is_case_sensitive() {
        let existing = [list(1, "Groceries")];
        assert_eq!(validate_list_name("groceries", &existing), Ok(()));
    }

    #[rstest]
    #[case("", false)]
    #[case("buy milk", true)]
    #[case(&"y".repeat(101), false)]
    fn todo_name_length_bounds(#[case] name: &str, #[case] ok: bool) {
        assert_eq!(validate_todo_name(name).is_ok(), ok);
    }

    #[rstest]
    fn messages_match_the_form_copy() {
        assert_eq!(
            NameError::ListNameLength.to_string(),
            "List name must be between 1 and 100 characters."
        );
        assert_eq!(
            NameError::TodoNameLength.to_string(),
            "Todo must be between 1 and 100 characters."
        );
        assert_eq!(NameError::TodoNameLength.field(), "todo");
    }
}
