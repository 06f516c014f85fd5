//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match the SQL migrations exactly; Diesel uses them for
//! compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// Registered users and their credentials.
    users (id) {
        /// Primary key, server-assigned.
        id -> Int4,
        /// Stored trimmed and lowercased; a unique index on `lower(email)`
        /// is the authoritative duplicate guard.
        email -> Varchar,
        /// bcrypt hash; never leaves the persistence boundary.
        password_hash -> Varchar,
        name -> Nullable<Varchar>,
        phone -> Nullable<Varchar>,
        /// `user` or `admin`; carried in session claims, not yet enforced.
        role -> Varchar,
        registered_at -> Timestamptz,
    }
}

diesel::table! {
    /// Citizen incident reports.
    incidents (id) {
        id -> Int4,
        title -> Varchar,
        category -> Nullable<Varchar>,
        location -> Nullable<Varchar>,
        description -> Nullable<Text>,
        /// Owning user; always taken from the verified session.
        user_id -> Int4,
        created_at -> Nullable<Timestamptz>,
        status -> Varchar,
        priority -> Varchar,
        latitude -> Float8,
        longitude -> Float8,
        /// JSON array of photo URL/data strings.
        photos -> Jsonb,
    }
}

diesel::table! {
    /// Status updates addressed to a single user.
    notifications (id) {
        id -> Int4,
        user_id -> Int4,
        title -> Varchar,
        message -> Text,
        category -> Varchar,
        read -> Bool,
        created_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Append-only feedback messages.
    feedback (id) {
        id -> Int4,
        category -> Nullable<Varchar>,
        message -> Text,
        user_id -> Nullable<Int4>,
        name -> Nullable<Varchar>,
        email -> Nullable<Varchar>,
        phone -> Nullable<Varchar>,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(incidents -> users (user_id));
diesel::joinable!(notifications -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, incidents, notifications, feedback);
