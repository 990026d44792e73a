//! Emptiness predicates for strings and collections.
//!
//! A string is blank when trimming leading and trailing whitespace leaves
//! nothing. Collections report emptiness through the [`Countable`] trait.

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use im::HashMap as ImHashMap;

// ============================================================================
// COUNTABLE COLLECTIONS
// ============================================================================

/// Types that can report how many elements they hold.
///
/// String slices count characters, not bytes.
pub trait Countable {
    /// Returns the number of contained elements.
    fn count(&self) -> usize;

    /// Returns true when no elements are contained.
    fn has_none(&self) -> bool {
        self.count() == 0
    }

    /// Returns true when at least one element is contained.
    fn has_any(&self) -> bool {
        self.count() > 0
    }
}

impl<T> Countable for [T] {
    fn count(&self) -> usize {
        self.len()
    }
}

impl<T> Countable for Vec<T> {
    fn count(&self) -> usize {
        self.len()
    }
}

impl<K, V, S> Countable for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn count(&self) -> usize {
        self.len()
    }
}

impl<K, V> Countable for BTreeMap<K, V> {
    fn count(&self) -> usize {
        self.len()
    }
}

impl<K, V, S> Countable for ImHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn count(&self) -> usize {
        self.len()
    }
}

impl Countable for str {
    fn count(&self) -> usize {
        self.chars().count()
    }
}

impl Countable for String {
    fn count(&self) -> usize {
        self.as_str().count()
    }
}

/// Returns true when the collection holds no elements.
///
/// # Examples
///
/// ```rust
/// use tabula::predicates::is_empty;
/// let none: Vec<i64> = Vec::new();
/// assert!(is_empty(&none));
/// assert!(!is_empty(&vec![1]));
/// ```
pub fn is_empty<C: Countable + ?Sized>(collection: &C) -> bool {
    collection.has_none()
}

/// Returns true when the collection holds at least one element.
pub fn is_not_empty<C: Countable + ?Sized>(collection: &C) -> bool {
    collection.has_any()
}

// ============================================================================
// STRING BLANKNESS
// ============================================================================

/// Blankness tests for string slices.
///
/// # Examples
///
/// ```rust
/// use tabula::predicates::StrExt;
/// assert!("   ".is_blank());
/// assert!("x".is_not_blank());
/// ```
pub trait StrExt {
    /// Returns true when trimming whitespace leaves nothing.
    fn is_blank(&self) -> bool;

    /// Returns true when the string has visible content.
    fn is_not_blank(&self) -> bool;
}

impl StrExt for str {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }

    fn is_not_blank(&self) -> bool {
        !self.is_blank()
    }
}

/// Returns true when the string is absent or blank.
///
/// # Examples
///
/// ```rust
/// use tabula::predicates::is_none_or_blank;
/// assert!(is_none_or_blank(None));
/// assert!(is_none_or_blank(Some("  ")));
/// assert!(!is_none_or_blank(Some("x")));
/// ```
pub fn is_none_or_blank(value: Option<&str>) -> bool {
    match value {
        Some(s) => s.is_blank(),
        None => true,
    }
}
