//! Server-rendered HTML pages.
//!
//! Every interpolated value passes through [`escape_html`]; list and todo
//! names are user input.

use actix_web::{HttpResponse, http::StatusCode, http::header::ContentType};

use super::flash::Flash;
use crate::domain::{NAME_MAX_CHARS, Todo, TodoList};

/// Escape text for use in element content and quoted attribute values.
///
/// # Examples
/// ```
/// use todo_lists::inbound::http::views::escape_html;
///
/// assert_eq!(escape_html("<b>\"Tom\" & 'Jerry'</b>"),
///     "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;");
/// ```
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// `"complete"` for a finished list.
pub fn list_class(list: &TodoList) -> Option<&'static str> {
    list.is_complete().then_some("complete")
}

/// `"complete"` for a checked todo.
pub fn todo_class(todo: &Todo) -> Option<&'static str> {
    todo.completed.then_some("complete")
}

fn class_attr(class: Option<&str>) -> String {
    class
        .map(|class| format!(" class=\"{class}\""))
        .unwrap_or_default()
}

/// Wrap `body` in the shared page chrome.
pub fn layout(title: &str, flash: Option<&Flash>, body: &str) -> String {
    let flash = flash
        .map(|flash| {
            format!(
                "<div class=\"{}\"><p>{}</p></div>\n",
                flash.kind.css_class(),
                escape_html(&flash.message)
            )
        })
        .unwrap_or_default();
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n</head>\n<body>\n\
         <header><h1><a href=\"/lists\">Todo Lists</a></h1></header>\n\
         {flash}<main>\n{body}</main>\n</body>\n</html>\n",
        title = escape_html(title),
    )
}

/// Lists ordered for display, each with its remaining and total counts.
pub fn lists_page(lists: &[&TodoList], flash: Option<&Flash>) -> String {
    let items: String = lists
        .iter()
        .map(|list| {
            format!(
                "<li{class}><a href=\"/lists/{id}\"><h2>{name}</h2>\
                 <p>{remaining} / {total}</p></a></li>\n",
                class = class_attr(list_class(list)),
                id = list.id(),
                name = escape_html(list.name().as_ref()),
                remaining = list.todos_remaining_count(),
                total = list.todos_count(),
            )
        })
        .collect();
    let body = format!(
        "<ul id=\"lists\">\n{items}</ul>\n<p><a class=\"add\" href=\"/lists/new\">New List</a></p>\n"
    );
    layout("Todo Lists", flash, &body)
}

fn name_input(field: &str, label: &str, value: &str) -> String {
    format!(
        "<label for=\"{field}\">{label}</label>\n\
         <input id=\"{field}\" name=\"{field}\" maxlength=\"{NAME_MAX_CHARS}\" \
         value=\"{value}\" autofocus>\n",
        value = escape_html(value),
    )
}

/// Form for a new list, prefilled with `value`.
pub fn new_list_page(value: &str, flash: Option<&Flash>) -> String {
    let body = format!(
        "<form action=\"/lists\" method=\"post\">\n{input}\
         <button type=\"submit\">Save</button>\n\
         <a href=\"/lists\">Cancel</a>\n</form>\n",
        input = name_input("list_name", "Enter the name for your new list:", value),
    );
    layout("New List", flash, &body)
}

/// Form for renaming `list`, prefilled with `value`.
pub fn edit_list_page(list: &TodoList, value: &str, flash: Option<&Flash>) -> String {
    let id = list.id();
    let body = format!(
        "<h2>Editing '{name}'</h2>\n\
         <form action=\"/lists/{id}\" method=\"post\">\n{input}\
         <button type=\"submit\">Save</button>\n\
         <a href=\"/lists/{id}\">Cancel</a>\n</form>\n\
         <form class=\"delete\" action=\"/lists/{id}/delete\" method=\"post\">\n\
         <button type=\"submit\">Delete List</button>\n</form>\n",
        name = escape_html(list.name().as_ref()),
        input = name_input("list_name", "Enter the new name for the list:", value),
    );
    layout("Edit List", flash, &body)
}

fn todo_item(list: &TodoList, todo: &Todo) -> String {
    let list_id = list.id();
    let todo_id = todo.id;
    format!(
        "<li{class}>\n\
         <form class=\"check\" action=\"/lists/{list_id}/todos/{todo_id}\" method=\"post\">\n\
         <input type=\"hidden\" name=\"completed\" value=\"{toggle}\">\n\
         <button type=\"submit\">{label}</button>\n</form>\n\
         <h3>{name}</h3>\n\
         <form class=\"delete\" action=\"/lists/{list_id}/todos/{todo_id}/delete\" method=\"post\">\n\
         <button type=\"submit\">Delete</button>\n</form>\n</li>\n",
        class = class_attr(todo_class(todo)),
        toggle = !todo.completed,
        label = if todo.completed { "Uncheck" } else { "Check" },
        name = escape_html(todo.name.as_ref()),
    )
}

/// A list with its todos ordered for display and the add-todo form.
pub fn list_page(
    list: &TodoList,
    todos: &[&Todo],
    todo_value: &str,
    flash: Option<&Flash>,
) -> String {
    let id = list.id();
    let items: String = todos.iter().map(|todo| todo_item(list, todo)).collect();
    let body = format!(
        "<section id=\"todos\"{class}>\n<header>\n<h2>{name}</h2>\n\
         <p>{remaining} / {total}</p>\n\
         <form action=\"/lists/{id}/complete_all\" method=\"post\">\n\
         <button class=\"check\" type=\"submit\">Complete All</button>\n</form>\n\
         <a class=\"edit\" href=\"/lists/{id}/edit\">Edit List</a>\n</header>\n\
         <ul>\n{items}</ul>\n</section>\n\
         <form action=\"/lists/{id}/todos\" method=\"post\">\n{input}\
         <button type=\"submit\">Add</button>\n</form>\n\
         <p><a href=\"/lists\">All Lists</a></p>\n",
        class = class_attr(list_class(list)),
        name = escape_html(list.name().as_ref()),
        remaining = list.todos_remaining_count(),
        total = list.todos_count(),
        input = name_input("todo", "Enter a new todo item:", todo_value),
    );
    layout(list.name().as_ref(), flash, &body)
}

/// Minimal page for failures no handler recovered from.
pub fn error_page(status: StatusCode, message: &str, trace_id: Option<&str>) -> String {
    let reason = status.canonical_reason().unwrap_or("Error");
    let trace = trace_id
        .map(|id| format!("<p class=\"trace\">Reference: {}</p>\n", escape_html(id)))
        .unwrap_or_default();
    let body = format!(
        "<h2>{code} {reason}</h2>\n<p>{message}</p>\n{trace}\
         <p><a href=\"/lists\">Back to your lists</a></p>\n",
        code = status.as_u16(),
        message = escape_html(message),
    );
    layout(reason, None, &body)
}

/// Wrap rendered markup in an HTML response.
pub fn html(status: StatusCode, markup: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(markup)
}
