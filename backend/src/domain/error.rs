//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses; the serialised shape is the JSON envelope
//! `{"error": <summary>, "message": <detail?>}` consumed by the web client.

use serde::Serialize;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// Authentication failed or is missing.
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    Forbidden,
    /// The requested resource does not exist.
    NotFound,
    /// The request conflicts with existing state (e.g. duplicate email).
    Conflict,
    /// A required dependency (database) is unreachable.
    ServiceUnavailable,
    /// An unexpected error occurred inside the domain.
    InternalError,
}

/// Domain error payload.
///
/// `summary` is the stable, user-facing description; `detail` carries the
/// underlying diagnostic message (storage driver text, codec failure) and is
/// not guaranteed stable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Error {
    #[serde(skip)]
    code: ErrorCode,
    #[serde(rename = "error")]
    summary: String,
    #[serde(rename = "message", skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

impl Error {
    /// Create a new error with the given code and summary.
    pub fn new(code: ErrorCode, summary: impl Into<String>) -> Self {
        Self {
            code,
            summary: summary.into(),
            detail: None,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable summary returned to clients.
    pub fn summary(&self) -> &str {
        self.summary.as_str()
    }

    /// Diagnostic detail, when one was attached.
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Attach an underlying diagnostic message to the error.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(summary: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, summary)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(summary: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, summary)
    }

    /// Convenience constructor for [`ErrorCode::Forbidden`].
    pub fn forbidden(summary: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, summary)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(summary: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, summary)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(summary: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, summary)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(summary: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, summary)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(summary: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, summary)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{}: {detail}", self.summary),
            None => write!(f, "{}", self.summary),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    fn serialises_envelope_without_detail() {
        let err = Error::invalid_request("title is required");
        let value = serde_json::to_value(&err).expect("serialise error");
        assert_eq!(value, json!({ "error": "title is required" }));
    }

    #[rstest]
    fn serialises_envelope_with_detail() {
        let err = Error::internal("error listing incidents").with_detail("connection refused");
        let value = serde_json::to_value(&err).expect("serialise error");
        assert_eq!(
            value,
            json!({
                "error": "error listing incidents",
                "message": "connection refused",
            })
        );
    }

    #[rstest]
    fn display_includes_detail_when_present() {
        let err = Error::conflict("email already registered").with_detail("duplicate key");
        assert_eq!(err.to_string(), "email already registered: duplicate key");
    }

    #[rstest]
    #[case(Error::unauthorized("login required"), ErrorCode::Unauthorized)]
    #[case(Error::not_found("missing"), ErrorCode::NotFound)]
    #[case(Error::service_unavailable("db down"), ErrorCode::ServiceUnavailable)]
    fn constructors_set_codes(#[case] err: Error, #[case] code: ErrorCode) {
        assert_eq!(err.code(), code);
        let value = serde_json::to_value(&err).expect("serialise error");
        assert!(value.get("code").is_none(), "code must stay internal");
        assert!(matches!(value.get("error"), Some(Value::String(_))));
    }
}
