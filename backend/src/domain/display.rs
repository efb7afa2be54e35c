//! Display ordering: incomplete items first, then complete ones.

use super::todo_list::{Todo, TodoList};

/// Stable partition of `items` into incomplete-then-complete.
///
/// Relative order inside each group is preserved.
///
/// # Examples
/// ```
/// use todo_lists::domain::partition_for_display;
///
/// let ordered = partition_for_display([1, 2, 3, 4, 5], |n| n % 2 == 0);
/// assert_eq!(ordered, vec![1, 3, 5, 2, 4]);
/// ```
pub fn partition_for_display<T, I, F>(items: I, is_complete: F) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> bool,
{
    let (complete, mut incomplete): (Vec<T>, Vec<T>) =
        items.into_iter().partition(|item| is_complete(item));
    incomplete.extend(complete);
    incomplete
}

/// Lists ordered for the index page.
#[must_use]
pub fn sort_lists(lists: &[TodoList]) -> Vec<&TodoList> {
    partition_for_display(lists, |list| list.is_complete())
}

/// Todos ordered for the list page.
#[must_use]
pub fn sort_todos(todos: &[Todo]) -> Vec<&Todo> {
    partition_for_display(todos, |todo| todo.completed)
}
