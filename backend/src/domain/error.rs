//! Error response payload and the closed set of domain error kinds.
//!
//! The HTTP adapter maps each [`ErrorCode`] to a status code and redacts
//! internal messages; nothing in this module depends on actix.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::middleware::trace::TraceId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// Authentication failed or is missing.
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    Forbidden,
    /// The requested resource does not exist.
    NotFound,
    /// The requested username is held by another user.
    UsernameTaken,
    /// The requested email is held by another user.
    EmailTaken,
    /// A uniqueness guarantee was violated on an unrecognised constraint.
    UnknownConflict,
    /// A required backing service could not be reached.
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    InternalError,
}

/// Domain error payload.
///
/// # Examples
/// ```
/// use cruder::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("users not found");
/// assert_eq!(err.code, ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Error {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    pub code: ErrorCode,
    /// Human-readable error message.
    #[schema(example = "users not found")]
    pub message: String,
    /// Correlation identifier for tracing this error across systems.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(alias = "trace_id")]
    pub trace_id: Option<String>,
    /// Supplementary structured details, e.g. `{ "field": "uuid" }`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl Error {
    /// Create a new error.
    ///
    /// Captures the current trace identifier if one is in scope so the
    /// payload is correlated automatically.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Attach a trace identifier to the error.
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use cruder::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::invalid_request("invalid UUID")
    ///     .with_details(json!({ "field": "uuid" }));
    /// assert!(err.details.is_some());
    /// ```
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::UsernameTaken`].
    pub fn username_taken(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UsernameTaken, message)
    }

    /// Convenience constructor for [`ErrorCode::EmailTaken`].
    pub fn email_taken(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::EmailTaken, message)
    }

    /// Convenience constructor for [`ErrorCode::UnknownConflict`].
    pub fn unknown_conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UnknownConflict, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}
