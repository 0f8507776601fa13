//! Diagnostic system for label parsing.
//!
//! Label errors are reported as [`Diagnostic`]s: a severity, an error
//! code, a message, and labeled spans into the label text. One or more
//! diagnostics are grouped into a [`ParseError`], the error type returned
//! by [`parse_label`](crate::parse_label).

mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
