//! Tabula error handling.
//!
//! Every failure in this crate flows through [`TabulaError`]. Errors are
//! constructed through the helper functions in this module; nothing outside
//! it builds a variant by hand.

use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

use crate::value::ValueKind;

/// Convenient type alias for fallible tabula operations.
pub type TabulaResult<T> = Result<T, TabulaError>;

// ============================================================================
// ERROR CLASSIFICATION
// ============================================================================

/// Type-safe error classification that corresponds to `TabulaError` variants.
/// Guards that let the caller pick the failure to raise take one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required value was absent
    NullArgument,
    /// A value was present but violated a shape constraint
    InvalidArgument,
    /// An operation was invoked against an object in the wrong state
    InvalidOperation,
    /// A value did not satisfy a column's declared kind
    TypeMismatch,
    /// A structural invariant of this crate was violated
    Internal,
}

impl ErrorKind {
    /// Returns the string representation used in diagnostic codes.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NullArgument => "null_argument",
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::InvalidOperation => "invalid_operation",
            ErrorKind::TypeMismatch => "type_mismatch",
            ErrorKind::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// CORE ERROR TYPE
// ============================================================================

/// Unified error type for all tabula failure modes.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TabulaError {
    #[error("Null argument: {message}")]
    NullArgument {
        message: String,
        name: Option<String>,
    },
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        message: String,
        name: Option<String>,
    },
    #[error("Invalid operation: {message}")]
    InvalidOperation {
        message: String,
        name: Option<String>,
    },
    #[error("Type mismatch: column '{column}' expected {expected}, found {found}")]
    TypeMismatch {
        column: String,
        expected: ValueKind,
        found: ValueKind,
    },
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        name: Option<String>,
    },
}

impl TabulaError {
    /// Returns the type-safe classification for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TabulaError::NullArgument { .. } => ErrorKind::NullArgument,
            TabulaError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            TabulaError::InvalidOperation { .. } => ErrorKind::InvalidOperation,
            TabulaError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            TabulaError::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Returns the offending parameter's name, when one was recorded.
    pub fn name(&self) -> Option<&str> {
        match self {
            TabulaError::NullArgument { name, .. }
            | TabulaError::InvalidArgument { name, .. }
            | TabulaError::InvalidOperation { name, .. }
            | TabulaError::Internal { name, .. } => name.as_deref(),
            TabulaError::TypeMismatch { .. } => None,
        }
    }
}

impl Diagnostic for TabulaError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(format!("tabula::{}", self.kind().as_str())))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.name()
            .map(|name| Box::new(format!("offending parameter: `{}`", name)) as Box<dyn fmt::Display>)
    }
}

// ============================================================================
// ERROR CONSTRUCTION HELPERS
// ============================================================================

/// Constructs a null-argument error (a required value was absent).
///
/// # Example
/// ```rust
/// use tabula::errors::null_argument;
/// let error = null_argument("Source record must be supplied.", Some("source"));
/// assert_eq!(error.name(), Some("source"));
/// ```
pub fn null_argument(message: impl Into<String>, name: Option<&str>) -> TabulaError {
    TabulaError::NullArgument {
        message: message.into(),
        name: name.map(str::to_string),
    }
}

/// Constructs an invalid-argument error (a value was present but violated a
/// shape constraint such as emptiness or a negative bound).
///
/// # Example
/// ```rust
/// use tabula::errors::invalid_argument;
/// let error = invalid_argument("Column name must not be blank.", Some("name"));
/// assert_eq!(error.name(), Some("name"));
/// ```
pub fn invalid_argument(message: impl Into<String>, name: Option<&str>) -> TabulaError {
    TabulaError::InvalidArgument {
        message: message.into(),
        name: name.map(str::to_string),
    }
}

/// Constructs an invalid-operation error (the target object was in the wrong
/// state for the requested operation).
pub fn invalid_operation(message: impl Into<String>, name: Option<&str>) -> TabulaError {
    TabulaError::InvalidOperation {
        message: message.into(),
        name: name.map(str::to_string),
    }
}

/// Constructs a type-mismatch error for a column whose declared kind a value
/// failed to satisfy.
pub fn type_mismatch(column: impl Into<String>, expected: ValueKind, found: ValueKind) -> TabulaError {
    TabulaError::TypeMismatch {
        column: column.into(),
        expected,
        found,
    }
}

/// Constructs an internal error. These indicate violated invariants inside
/// this crate, not caller mistakes.
pub fn internal(message: impl Into<String>) -> TabulaError {
    TabulaError::Internal {
        message: message.into(),
        name: None,
    }
}

/// Constructs an error of the requested kind from a bare message.
///
/// This is the single construction path behind every guard that takes a
/// caller-selected [`ErrorKind`]. `TypeMismatch` carries structured column
/// data and cannot be built from a message alone; requesting it here degrades
/// to an internal error.
///
/// # Example
/// ```rust
/// use tabula::errors::{failure, ErrorKind};
/// let error = failure(ErrorKind::InvalidOperation, "Value is default.", None);
/// assert_eq!(error.kind(), ErrorKind::InvalidOperation);
/// ```
pub fn failure(kind: ErrorKind, message: impl Into<String>, name: Option<&str>) -> TabulaError {
    let message = message.into();
    let name = name.map(str::to_string);
    match kind {
        ErrorKind::NullArgument => TabulaError::NullArgument { message, name },
        ErrorKind::InvalidArgument => TabulaError::InvalidArgument { message, name },
        ErrorKind::InvalidOperation => TabulaError::InvalidOperation { message, name },
        ErrorKind::Internal => TabulaError::Internal { message, name },
        ErrorKind::TypeMismatch => TabulaError::Internal {
            message: "Cannot instantiate the requested failure kind.".to_string(),
            name,
        },
    }
}
