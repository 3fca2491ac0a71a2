//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{NewUser, User, UserPatch};

/// Persistence errors raised by user repository adapters.
///
/// The conflict variants are produced by the adapter's single
/// constraint-translation function; nothing above the persistence layer
/// inspects storage-engine error shapes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection {
        /// Underlying pool or driver message.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query {
        /// Underlying driver message.
        message: String,
    },
    /// No row matched the lookup, delete, or update target.
    #[error("users not found")]
    NotFound,
    /// The username uniqueness constraint was violated.
    #[error("the username is already taken")]
    UsernameTaken,
    /// The email uniqueness constraint was violated.
    #[error("the email is already in use")]
    EmailTaken,
    /// A uniqueness constraint outside the recognised set was violated.
    #[error("unknown conflict on constraint {constraint}")]
    UnknownConflict {
        /// Name of the violated constraint, for operators.
        constraint: String,
    },
}

impl UserPersistenceError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Create an unknown-conflict error for the given constraint name.
    pub fn unknown_conflict(constraint: impl Into<String>) -> Self {
        Self::UnknownConflict {
            constraint: constraint.into(),
        }
    }
}

/// Storage port for user records.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch every user ordered by full name, nulls last. An empty store
    /// yields an empty vector, not an error.
    async fn get_all(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch a single user by username.
    async fn get_by_username(&self, username: &str) -> Result<User, UserPersistenceError>;

    /// Fetch a single user by internal identifier.
    async fn get_by_id(&self, id: i64) -> Result<User, UserPersistenceError>;

    /// Delete the user with the given public identity.
    async fn delete_by_uuid(&self, uuid: Uuid) -> Result<(), UserPersistenceError>;

    /// Apply a resolved patch as a single update statement. An empty patch
    /// succeeds without touching storage.
    async fn partially_update_by_uuid(
        &self,
        uuid: Uuid,
        patch: &UserPatch,
    ) -> Result<(), UserPersistenceError>;

    /// Insert a new user and return the stored record with generated
    /// identity fields.
    async fn create(&self, new_user: &NewUser) -> Result<User, UserPersistenceError>;
}
