//! Diesel table definitions for the blog schema.
//!
//! These must match `backend/migrations` exactly; `diesel print-schema`
//! regenerates them from a migrated database.

diesel::table! {
    /// Registered authors and commenters.
    users (id) {
        id -> Int4,
        name -> Varchar,
        /// Unique (`users_email_key`).
        email -> Varchar,
        image_url -> Nullable<Varchar>,
        bio -> Nullable<Text>,
    }
}

diesel::table! {
    /// Blog posts. Deleting an author with posts is restricted.
    posts (id) {
        id -> Int4,
        title -> Varchar,
        body -> Text,
        author_id -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Comments; cascaded away with their post.
    comments (id) {
        id -> Int4,
        body -> Text,
        author_id -> Int4,
        post_id -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    tags (id) {
        id -> Int4,
        /// Unique (`tags_name_key`).
        name -> Varchar,
    }
}

diesel::table! {
    /// Post/tag join rows, cascaded away with either side.
    post_tags (post_id, tag_id) {
        post_id -> Int4,
        tag_id -> Int4,
    }
}

diesel::joinable!(posts -> users (author_id));
diesel::joinable!(comments -> posts (post_id));
diesel::joinable!(post_tags -> posts (post_id));
diesel::joinable!(post_tags -> tags (tag_id));

diesel::allow_tables_to_appear_in_same_query!(users, posts, comments, tags, post_tags);
