//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the domain service and remain testable without I/O.

use std::sync::Arc;

use crate::domain::UserService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// User use-cases backed by the configured repository.
    pub users: Arc<UserService>,
}

impl HttpState {
    /// Create state wrapping the given user service.
    pub fn new(users: Arc<UserService>) -> Self {
        Self { users }
    }
}
