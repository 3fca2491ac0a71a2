//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent JSON responses and
//! status codes.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode};
use crate::middleware::TRACE_ID_HEADER;

pub use crate::domain::ApiResult;

/// Message returned in place of internal error details.
pub const INTERNAL_ERROR_MESSAGE: &str =
    "It's not you. It's us. We are already working on it.";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::UsernameTaken | ErrorCode::EmailTaken | ErrorCode::UnknownConflict => {
            StatusCode::CONFLICT
        }
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Replace internal error details with a neutral message, preserving the
/// trace identifier so operators can still correlate the failure.
fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code, ErrorCode::InternalError) {
        let mut redacted = Error::internal(INTERNAL_ERROR_MESSAGE);
        redacted.trace_id = error.trace_id.clone();
        redacted.details = None;
        redacted
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code)
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = &self.trace_id {
            builder.insert_header((TRACE_ID_HEADER, id.clone()));
        }

        builder.json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("unhandled actix error")
    }
}
