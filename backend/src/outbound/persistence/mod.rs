//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! The adapter is thin: it translates between Diesel row structs and domain
//! types and maps driver errors to `UserPersistenceError`. Row structs
//! (`models.rs`) and table definitions (`schema.rs`) are implementation
//! details, never exposed to the domain layer. Connections come from a
//! `bb8` pool with native async support through `diesel-async`.

mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
