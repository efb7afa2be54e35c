//! Diesel table definitions; must match `migrations/`.

diesel::table! {
    /// Named todo lists. `name` is unique and at most 100 characters.
    lists (id) {
        id -> Int4,
        name -> Varchar,
    }
}

diesel::table! {
    /// Todos, removed with their list by `ON DELETE CASCADE`.
    todos (id) {
        id -> Int4,
        list_id -> Int4,
        name -> Varchar,
        completed -> Bool,
    }
}

diesel::joinable!(todos -> lists (list_id));
diesel::allow_tables_to_appear_in_same_query!(lists, todos);
