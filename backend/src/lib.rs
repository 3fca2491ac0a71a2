//! User directory service: a layered CRUD backend for user records.
//!
//! The crate follows a ports-and-adapters layout. `domain` holds the
//! transport-agnostic model, errors, and the orchestrating service;
//! `inbound::http` adapts the domain to actix-web; `outbound::persistence`
//! implements the repository port against PostgreSQL via Diesel.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Request-scoped tracing middleware, re-exported for `App::wrap`.
pub use middleware::trace::Trace;
