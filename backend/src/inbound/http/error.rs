//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent JSON envelopes and
//! status codes.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::ports::PersistenceError;
use crate::domain::{Error, ErrorCode};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self.code(), ErrorCode::InternalError) {
            error!(error = %self, "request failed with internal error");
        }
        HttpResponse::build(self.status_code()).json(self)
    }
}

/// Map a persistence failure onto the handler's error summary.
///
/// Connection loss answers 503, unique violations 409, anything else is the
/// generic "error performing operation" signal with the driver message kept
/// for diagnostics.
pub(crate) fn map_persistence(summary: &'static str, error: PersistenceError) -> Error {
    match error {
        PersistenceError::Connection { message } => {
            Error::service_unavailable(summary).with_detail(message)
        }
        PersistenceError::UniqueViolation { message } => {
            Error::conflict(summary).with_detail(message)
        }
        PersistenceError::Query { message } => Error::internal(summary).with_detail(message),
    }
}
