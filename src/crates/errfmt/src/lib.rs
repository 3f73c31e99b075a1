//! Human-readable error formatting
//!
//! This crate renders an error value, optionally together with its cause
//! chain and its stack trace, into a single string.
//!
//! # Modules
//!
//! - `value` - The formattable value model (`Value`, `ErrorObject`)
//! - `normalize` - Conversion of arbitrary values into error objects
//! - `options` - Verbosity selectors (`FormatOptions`, `ErrorParts`, `FormatRequest`)
//! - `format` - The formatter itself
//!
//! # Example
//!
//! ```rust
//! use errfmt::{format_error, ErrorObject, ErrorParts, FormatRequest, Value};
//!
//! let error = ErrorObject::new("TypeError", "Zeta")
//!     .with_cause(ErrorObject::generic("Sigma"));
//! let value = Value::from(error);
//!
//! assert_eq!(format_error(&value, FormatRequest::Default).unwrap(), r#"TypeError("Zeta")"#);
//! assert_eq!(
//!     format_error(&value, ErrorParts::MAIN).unwrap(),
//!     r#"TypeError("Zeta"). Cause: Error("Sigma")"#
//! );
//! ```

pub mod format;
pub mod normalize;
pub mod options;
pub mod value;

pub use format::format_error;
pub use normalize::to_error;
pub use options::{ErrorParts, FormatOptions, FormatRequest, PartialFormatOptions};
pub use value::{ErrorObject, Value};

use thiserror::Error;

/// Errors that can occur while formatting
///
/// An invalid request is the only way formatting can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The effective request cannot produce any output
    #[error("{0}")]
    Configuration(String),
}

/// Result type for formatting operations
pub type Result<T> = std::result::Result<T, FormatError>;

/// Get version information
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_displays_verbatim() {
        let err = FormatError::Configuration("Cannot format this".to_string());
        assert_eq!(err.to_string(), "Cannot format this");
    }

    #[test]
    fn test_version() {
        let v = version();
        assert!(!v.is_empty());
    }
}
