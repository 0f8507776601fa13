//! Error codes for the label diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Lexing errors
//! - `E1xx` - Parsing errors

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Lexing Errors (E0xx)
    // =========================================================================
    /// Unexpected character.
    ///
    /// A label word contains a character that is valid in neither a name
    /// nor a number.
    E001,

    /// Malformed number.
    ///
    /// A label word starts like a decimal literal but is not one
    /// (e.g. `4a` or `1.2.3`).
    E002,

    // =========================================================================
    // Parsing Errors (E1xx)
    // =========================================================================
    /// Empty label.
    ///
    /// A node shape has no text, so it declares no node type.
    E100,

    /// Expected a node type name.
    ///
    /// The first word of a label must be a name, not a number.
    E101,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Lexing errors
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            // Parsing errors
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            // Lexing errors
            ErrorCode::E001 => "unexpected character",
            ErrorCode::E002 => "malformed number",
            // Parsing errors
            ErrorCode::E100 => "empty label",
            ErrorCode::E101 => "expected node type name",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E100.to_string(), "E100");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E002.description(), "malformed number");
        assert_eq!(ErrorCode::E101.description(), "expected node type name");
    }
}
