//! User record and the transient inputs to create and patch operations.

use uuid::Uuid;

use crate::domain::patch::FieldPatch;

/// A stored user record.
///
/// ## Invariants
/// - `id` and `uuid` are assigned by the storage layer and never change.
/// - `username` and `email` are unique across all users.
/// - `id` is internal and must never appear on the wire; `uuid` is the
///   public identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Internal sequential identifier.
    pub id: i64,
    /// Public identity.
    pub uuid: Uuid,
    /// Unique login name.
    pub username: String,
    /// Unique contact address.
    pub email: String,
    /// Optional display name; null when never set or erased.
    pub full_name: Option<String>,
}

/// Input to the create operation. Identity fields are generated by storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Requested unique login name.
    pub username: String,
    /// Requested unique contact address.
    pub email: String,
    /// Optional display name.
    pub full_name: Option<String>,
}

/// A resolved partial update, not persisted.
///
/// `username` and `email` are plain optional assignments; `full_name` is
/// tri-state because the column is nullable and "erase" must stay distinct
/// from "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    /// Replacement username, if any.
    pub username: Option<String>,
    /// Replacement email, if any.
    pub email: Option<String>,
    /// Full name resolution: keep, erase, or set.
    pub full_name: FieldPatch<String>,
}

impl UserPatch {
    /// Whether the patch resolves to zero column assignments.
    ///
    /// An empty patch is a valid no-op, never an error.
    pub const fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.full_name.is_keep()
    }
}
