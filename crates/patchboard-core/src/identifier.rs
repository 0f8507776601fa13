//! Identifier management using string interning for efficient string storage and comparison
//!
//! This module provides the [`Id`] type with an efficient string-interner based approach.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for efficient identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

/// Efficient identifier type using string interning
///
/// Shape ids from the canvas export and node type names both become
/// interned [`Id`]s, so equality checks during compilation are symbol
/// comparisons rather than string comparisons.
///
/// # Examples
///
/// ```
/// use patchboard_core::identifier::Id;
///
/// // Create identifiers from names
/// let shape_id = Id::new("shape:x7Kp2");
/// let kind = Id::new("sine");
///
/// // Create anonymous slot identifiers
/// let slot = Id::from_anonymous(0);
/// assert_eq!(slot, "__0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str.
    ///
    /// # Arguments
    ///
    /// * `name` - The string representation of the identifier
    ///
    /// # Examples
    ///
    /// ```
    /// use patchboard_core::identifier::Id;
    ///
    /// let shape_id = Id::new("shape:x7Kp2");
    /// let kind = Id::new("out");
    /// ```
    pub fn new(name: &str) -> Self {
        let mut interner = INTERNER
            .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
            .lock()
            .expect("Failed to acquire interner lock");
        let symbol = interner.get_or_intern(name);
        Self(symbol)
    }

    /// Creates an internal `Id` identifier without string representation.
    ///
    /// Used for padding input slots that were never declared in a shape
    /// label (e.g. the sink's implicit single inlet).
    ///
    /// # Arguments
    ///
    /// * `idx` - A unique index used to generate the anonymous identifier.
    pub fn from_anonymous(idx: usize) -> Self {
        let name = format!("__{idx}");
        Self::new(&name)
    }

    /// Returns the string this identifier was interned from.
    pub fn as_str(&self) -> String {
        let interner = INTERNER
            .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
            .lock()
            .expect("Failed to acquire interner lock");
        interner
            .resolve(self.0)
            .expect("Id symbol missing from interner")
            .to_string()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        *self == Id::new(other)
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Id::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_name_same_id() {
        let a = Id::new("sine");
        let b = Id::new("sine");
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_names_differ() {
        let a = Id::new("sine");
        let b = Id::new("saw");
        assert_ne!(a, b);
    }

    #[test]
    fn test_display_roundtrip() {
        let id = Id::new("shape:abc123");
        assert_eq!(id.to_string(), "shape:abc123");
    }

    #[test]
    fn test_str_equality() {
        let id = Id::new("freq");
        assert_eq!(id, "freq");
        assert_ne!(id, "phase");
    }

    #[test]
    fn test_anonymous_ids_are_stable() {
        assert_eq!(Id::from_anonymous(3), Id::from_anonymous(3));
        assert_ne!(Id::from_anonymous(3), Id::from_anonymous(4));
    }
}
