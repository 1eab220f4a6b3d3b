//! Unified application error types for AuditHub.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The referenced audit, finding, section, or comment was not found.
    NotFound,
    /// The caller does not have permission to perform the action.
    PermissionDenied,
    /// Input validation failed.
    Validation,
    /// A workflow state machine rule was violated (including the edit lock).
    InvalidTransition,
    /// The operation requires a review-policy flag that is not currently set.
    PolicyDisabled,
    /// The creator/collaborator/reviewer disjointness invariant was violated.
    RoleConflict,
    /// The operation requires a different workflow state than the current one.
    InvalidState,
    /// An ordering index was outside the valid range.
    OutOfRange,
    /// A comment target was malformed (zero or both anchors set).
    BadTarget,
    /// The export gate failed because the audit is not approved.
    NotApproved,
    /// A conflict occurred (duplicate entry, concurrent modification, etc.).
    Conflict,
    /// The report template is missing or not configured.
    Template,
    /// The external report generator failed to render the document.
    Render,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// A configuration error occurred.
    Configuration,
    /// An internal error occurred (store or broadcaster transport failure).
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::PermissionDenied => write!(f, "PERMISSION_DENIED"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::InvalidTransition => write!(f, "INVALID_TRANSITION"),
            Self::PolicyDisabled => write!(f, "POLICY_DISABLED"),
            Self::RoleConflict => write!(f, "ROLE_CONFLICT"),
            Self::InvalidState => write!(f, "INVALID_STATE"),
            Self::OutOfRange => write!(f, "OUT_OF_RANGE"),
            Self::BadTarget => write!(f, "BAD_TARGET"),
            Self::NotApproved => write!(f, "NOT_APPROVED"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Template => write!(f, "TEMPLATE"),
            Self::Render => write!(f, "RENDER"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout AuditHub.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. Every error is recoverable and
/// caller-visible: no operation panics on invalid input. The optional
/// `subject` carries the offending identifier (a user, an index, a comment)
/// so callers can render a specific message.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// The identifier the error is about, when one applies.
    pub subject: Option<String>,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            subject: None,
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            subject: None,
            source: Some(Box::new(source)),
        }
    }

    /// Attach the offending identifier to the error.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a permission-denied error.
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PermissionDenied, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create an invalid-transition error.
    pub fn invalid_transition(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidTransition, message)
    }

    /// Create a policy-disabled error.
    pub fn policy_disabled(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PolicyDisabled, message)
    }

    /// Create a role-conflict error naming the offending user.
    pub fn role_conflict(message: impl Into<String>, offender: impl Into<String>) -> Self {
        Self::new(ErrorKind::RoleConflict, message).with_subject(offender)
    }

    /// Create an invalid-state error.
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidState, message)
    }

    /// Create an out-of-range error.
    pub fn out_of_range(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::OutOfRange, message)
    }

    /// Create a bad-target error.
    pub fn bad_target(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadTarget, message)
    }

    /// Create a not-approved error.
    pub fn not_approved(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotApproved, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create a template error.
    pub fn template(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Template, message)
    }

    /// Create a render error.
    pub fn render(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Render, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            subject: self.subject.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Internal, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
