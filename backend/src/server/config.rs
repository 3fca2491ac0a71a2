//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use crate::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) api_key: Option<String>,
}

impl ServerConfig {
    /// Construct a server configuration binding to the given address and
    /// using the given connection pool.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, db_pool: DbPool) -> Self {
        Self {
            bind_addr,
            db_pool,
            api_key: None,
        }
    }

    /// Require the given key in the `X-API-Key` header on every API route.
    /// An empty key disables the check.
    #[must_use]
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|key| !key.is_empty());
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
