//! Actix middleware: request tracing and API-key enforcement.

pub mod api_key;
pub mod trace;

pub use api_key::ApiKeyAuth;
pub use trace::{TRACE_ID_HEADER, Trace};
