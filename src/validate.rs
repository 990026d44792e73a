//! Guard functions for argument and state validation.
//!
//! Each guard tests one condition and returns `Ok(())` when it holds.
//! Guards that take an [`ErrorKind`] raise the caller's chosen failure;
//! the rest raise the kind named in their contract. Parameter guards
//! (`require_param_*`) attach the parameter's name to the error.

use std::fmt::Debug;

use crate::errors::{failure, invalid_argument, null_argument, ErrorKind, TabulaResult};
use crate::predicates::{Countable, StrExt};

// ============================================================================
// PARAMETER GUARDS
// ============================================================================

/// Validates that a required parameter is present.
///
/// # Example
/// ```rust
/// use tabula::validate::require_param_not_null;
/// let config = String::from("loaded");
/// assert!(require_param_not_null(Some(&config), "Configuration must be supplied.", "config").is_ok());
/// assert!(require_param_not_null::<String>(None, "Configuration must be supplied.", "config").is_err());
/// ```
pub fn require_param_not_null<T: ?Sized>(
    value: Option<&T>,
    message: impl Into<String>,
    name: &str,
) -> TabulaResult<()> {
    if value.is_none() {
        Err(null_argument(message, Some(name)))
    } else {
        Ok(())
    }
}

/// Validates that a parameter differs from its type's default value.
pub fn require_param_not_default<T>(
    value: &T,
    message: impl Into<String>,
    name: &str,
) -> TabulaResult<()>
where
    T: Default + PartialEq,
{
    if *value == T::default() {
        Err(null_argument(message, Some(name)))
    } else {
        Ok(())
    }
}

/// Validates that a string parameter has visible content.
///
/// # Example
/// ```rust
/// use tabula::validate::require_param_not_blank;
/// assert!(require_param_not_blank("Name", "Column name must not be blank.", "name").is_ok());
/// assert!(require_param_not_blank("   ", "Column name must not be blank.", "name").is_err());
/// ```
pub fn require_param_not_blank(
    value: &str,
    message: impl Into<String>,
    name: &str,
) -> TabulaResult<()> {
    if value.is_blank() {
        Err(invalid_argument(message, Some(name)))
    } else {
        Ok(())
    }
}

/// Validates that a collection parameter holds at least one element.
pub fn require_param_not_empty<C>(
    collection: &C,
    message: impl Into<String>,
    name: &str,
) -> TabulaResult<()>
where
    C: Countable + ?Sized,
{
    if collection.has_none() {
        Err(invalid_argument(message, Some(name)))
    } else {
        Ok(())
    }
}

// ============================================================================
// VALUE GUARDS WITH CALLER-SELECTED FAILURE KINDS
// ============================================================================

/// Validates that two values are equal, raising the chosen failure kind
/// otherwise. The default message embeds both values.
///
/// # Example
/// ```rust
/// use tabula::errors::ErrorKind;
/// use tabula::validate::require_equals;
/// assert!(require_equals(&3, &3, ErrorKind::InvalidOperation, None).is_ok());
/// assert!(require_equals(&3, &4, ErrorKind::InvalidOperation, None).is_err());
/// ```
pub fn require_equals<T>(
    value: &T,
    expected: &T,
    kind: ErrorKind,
    message: Option<&str>,
) -> TabulaResult<()>
where
    T: PartialEq + Debug,
{
    if value == expected {
        return Ok(());
    }
    let message = match message {
        Some(m) => m.to_string(),
        None => format!("{:?} does not equal expected value of {:?}", value, expected),
    };
    Err(failure(kind, message, None))
}

/// Validates that two values differ, raising the chosen failure kind
/// otherwise. The default message embeds both values.
pub fn require_not_equals<T>(
    value: &T,
    excluded: &T,
    kind: ErrorKind,
    message: Option<&str>,
) -> TabulaResult<()>
where
    T: PartialEq + Debug,
{
    if value != excluded {
        return Ok(());
    }
    let message = match message {
        Some(m) => m.to_string(),
        None => format!("{:?} equals excluded value of {:?}", value, excluded),
    };
    Err(failure(kind, message, None))
}

/// Validates that a value is present, raising the chosen failure kind when
/// it is absent.
pub fn require_not_null<T: ?Sized>(
    value: Option<&T>,
    kind: ErrorKind,
    message: Option<&str>,
) -> TabulaResult<()> {
    if value.is_some() {
        return Ok(());
    }
    Err(failure(kind, message.unwrap_or("Value is null."), None))
}

/// Validates that a value differs from its type's default, raising the
/// chosen failure kind otherwise.
pub fn require_not_default<T>(
    value: &T,
    kind: ErrorKind,
    message: Option<&str>,
) -> TabulaResult<()>
where
    T: Default + PartialEq,
{
    if *value != T::default() {
        return Ok(());
    }
    Err(failure(kind, message.unwrap_or("Value is default."), None))
}

/// Validates that a collection is present and holds at least one element.
/// Absence and emptiness raise the same caller-chosen kind.
///
/// # Example
/// ```rust
/// use tabula::errors::ErrorKind;
/// use tabula::validate::require_not_null_or_empty;
/// let items = vec![1, 2];
/// assert!(require_not_null_or_empty(Some(&items), ErrorKind::InvalidArgument, None, "items").is_ok());
/// assert!(require_not_null_or_empty::<Vec<i64>>(None, ErrorKind::InvalidArgument, None, "items").is_err());
/// ```
pub fn require_not_null_or_empty<C>(
    collection: Option<&C>,
    kind: ErrorKind,
    message: Option<&str>,
    name: &str,
) -> TabulaResult<()>
where
    C: Countable + ?Sized,
{
    let message = message.unwrap_or("Value is null or empty.");
    match collection {
        Some(c) if c.has_any() => Ok(()),
        _ => Err(failure(kind, message, Some(name))),
    }
}

/// Validates that a collection holds at least `minimum_length` elements,
/// raising the chosen failure kind when it falls short.
///
/// A negative `minimum_length` is itself invalid and raises
/// `InvalidArgument` regardless of the collection's contents.
pub fn require_minimum_length<C>(
    collection: &C,
    minimum_length: i64,
    kind: ErrorKind,
    message: Option<&str>,
) -> TabulaResult<()>
where
    C: Countable + ?Sized,
{
    if minimum_length < 0 {
        return Err(invalid_argument(
            "Minimum length must be zero or greater.",
            Some("minimum_length"),
        ));
    }
    let count = collection.count() as i64;
    if count >= minimum_length {
        return Ok(());
    }
    let message = match message {
        Some(m) => m.to_string(),
        None => format!("{} is less than expected value of {}", count, minimum_length),
    };
    Err(failure(kind, message, None))
}
