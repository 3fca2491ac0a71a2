//! Domain model, errors, and the user service.
//!
//! Types here are transport agnostic: inbound adapters map them to HTTP
//! responses, outbound adapters map rows into them. Invariants and
//! serialisation contracts are documented on each type.

pub mod error;
pub mod patch;
pub mod ports;
pub mod user;
pub mod users_service;

pub use self::error::{Error, ErrorCode};
pub use self::patch::FieldPatch;
pub use self::user::{NewUser, User, UserPatch};
pub use self::users_service::UserService;

/// Convenient result alias for domain operations.
pub type ApiResult<T> = Result<T, Error>;
