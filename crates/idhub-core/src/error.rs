//! # Service Error Taxonomy
//!
//! Structured errors for service-level operations, built with `thiserror`.
//!
//! The one distinction that matters everywhere: a lookup *miss* is a normal
//! `Ok(None)` outcome, while a failed *operation* is a [`ServiceError`].
//! Callers that need the underlying failure text (for example to wrap it
//! into a fault raised through the authorization subsystem) read it via
//! [`ServiceError::failure_detail`].

use thiserror::Error;

/// Classification of a service failure.
///
/// The kinds mirror the HTTP taxonomy the API layer maps them to, so a
/// service implementation never has to know about status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceErrorKind {
    /// The request was malformed (unknown query field, invalid argument).
    BadRequest,
    /// The addressed resource does not exist.
    NotFound,
    /// The operation conflicts with current resource state.
    Conflict,
    /// The caller is not permitted to perform the operation.
    Unauthorized,
    /// The service itself failed (query execution, backing store).
    Internal,
}

impl ServiceErrorKind {
    /// Return the string representation of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "bad request",
            Self::NotFound => "not found",
            Self::Conflict => "conflict",
            Self::Unauthorized => "unauthorized",
            Self::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ServiceErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured service-level failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct ServiceError {
    /// Failure classification.
    pub kind: ServiceErrorKind,
    /// Human-readable failure detail.
    pub message: String,
}

impl ServiceError {
    /// Construct an error of the given kind.
    pub fn new(kind: ServiceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// A malformed-request failure.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ServiceErrorKind::BadRequest, message)
    }

    /// A missing-resource failure.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ServiceErrorKind::NotFound, message)
    }

    /// A state-conflict failure.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ServiceErrorKind::Conflict, message)
    }

    /// A permission failure.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ServiceErrorKind::Unauthorized, message)
    }

    /// An internal service failure.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ServiceErrorKind::Internal, message)
    }

    /// The full failure detail, kind included.
    ///
    /// This is the text preserved when a failure is wrapped into a fault
    /// and re-raised by another subsystem.
    pub fn failure_detail(&self) -> String {
        self.to_string()
    }
}

/// Result alias used across all service contracts.
pub type ServiceResult<T> = Result<T, ServiceError>;
