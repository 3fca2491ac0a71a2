//! Diesel schema for the users table.
//!
//! The table carries two unique constraints beyond the primary key:
//! `users_username_key` on `username` and `users_email_key` on `email`.
//! Constraint names matter because the repository classifies conflict
//! errors by the violated constraint.

diesel::table! {
    /// Application user accounts.
    users (id) {
        /// Surrogate primary key.
        id -> Int8,
        /// Stable external identifier, generated by the database.
        uuid -> Uuid,
        /// Unique login name.
        username -> Varchar,
        /// Unique contact address.
        email -> Varchar,
        /// Optional display name.
        full_name -> Nullable<Varchar>,
    }
}
