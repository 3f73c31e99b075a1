//! Verbosity selectors
//!
//! Callers choose what to render either with a structured option set
//! ([`FormatOptions`] / [`PartialFormatOptions`]) or with an [`ErrorParts`]
//! bitmask. Both resolve to the same [`FormatOptions`] and share one
//! validation rule.

use crate::{FormatError, Result};
use serde::{Deserialize, Serialize};
use std::ops::{BitOr, BitOrAssign};

/// Message of the error returned when neither class nor message is requested
pub const NOTHING_REQUESTED: &str =
    "Cannot format an error when neither its class nor its message is requested";

/// Fully resolved set of parts to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Include the error's class name
    pub show_class: bool,
    /// Include the error's message
    pub show_message: bool,
    /// Include every error of the cause chain
    pub show_cause_chain: bool,
    /// Append the top-level error's stack trace
    pub show_stack_trace: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            show_class: true,
            show_message: true,
            show_cause_chain: false,
            show_stack_trace: false,
        }
    }
}

impl FormatOptions {
    /// Request every part
    pub const ALL: Self = Self {
        show_class: true,
        show_message: true,
        show_cause_chain: true,
        show_stack_trace: true,
    };

    /// Create the default options (class and message only)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to include the class name
    pub fn with_class(mut self, show: bool) -> Self {
        self.show_class = show;
        self
    }

    /// Set whether to include the message
    pub fn with_message(mut self, show: bool) -> Self {
        self.show_message = show;
        self
    }

    /// Set whether to include the cause chain
    pub fn with_cause_chain(mut self, show: bool) -> Self {
        self.show_cause_chain = show;
        self
    }

    /// Set whether to append the stack trace
    pub fn with_stack_trace(mut self, show: bool) -> Self {
        self.show_stack_trace = show;
        self
    }

    /// Default options with the given partial options applied over them
    pub fn merged(partial: &PartialFormatOptions) -> Self {
        partial.apply_to(Self::default())
    }

    /// Check that the options can produce any output at all
    pub fn validate(&self) -> Result<()> {
        if !(self.show_class || self.show_message) {
            return Err(FormatError::Configuration(NOTHING_REQUESTED.to_string()));
        }
        Ok(())
    }
}

/// Options where every field may be left unspecified
///
/// Unspecified fields fall back to the defaults of [`FormatOptions`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialFormatOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_class: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_message: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_cause_chain: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_stack_trace: Option<bool>,
}

impl PartialFormatOptions {
    /// Overwrite the fields of `base` that are specified here
    pub fn apply_to(&self, base: FormatOptions) -> FormatOptions {
        FormatOptions {
            show_class: self.show_class.unwrap_or(base.show_class),
            show_message: self.show_message.unwrap_or(base.show_message),
            show_cause_chain: self.show_cause_chain.unwrap_or(base.show_cause_chain),
            show_stack_trace: self.show_stack_trace.unwrap_or(base.show_stack_trace),
        }
    }
}

impl From<FormatOptions> for PartialFormatOptions {
    fn from(options: FormatOptions) -> Self {
        Self {
            show_class: Some(options.show_class),
            show_message: Some(options.show_message),
            show_cause_chain: Some(options.show_cause_chain),
            show_stack_trace: Some(options.show_stack_trace),
        }
    }
}

/// Bitmask of the parts to render
///
/// # Example
///
/// ```rust
/// use errfmt::{ErrorParts, FormatOptions};
///
/// let parts = ErrorParts::CLASS | ErrorParts::CAUSE_CHAIN;
/// let options = FormatOptions::from(parts);
///
/// assert!(options.show_class);
/// assert!(!options.show_message);
/// assert!(options.show_cause_chain);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorParts(u8);

impl ErrorParts {
    pub const CLASS: Self = Self(1);
    pub const MESSAGE: Self = Self(2);
    pub const CORE: Self = Self(Self::CLASS.0 | Self::MESSAGE.0);
    pub const CAUSE_CHAIN: Self = Self(4);
    pub const MAIN: Self = Self(Self::CORE.0 | Self::CAUSE_CHAIN.0);
    pub const STACK: Self = Self(8);
    pub const ALL: Self = Self(Self::MAIN.0 | Self::STACK.0);

    /// The empty mask
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Raw bit value
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether every bit of `other` is set in `self`
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl Default for ErrorParts {
    fn default() -> Self {
        Self::CORE
    }
}

impl BitOr for ErrorParts {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ErrorParts {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl From<ErrorParts> for FormatOptions {
    fn from(parts: ErrorParts) -> Self {
        Self {
            show_class: parts.contains(ErrorParts::CLASS),
            show_message: parts.contains(ErrorParts::MESSAGE),
            show_cause_chain: parts.contains(ErrorParts::CAUSE_CHAIN),
            show_stack_trace: parts.contains(ErrorParts::STACK),
        }
    }
}

impl From<FormatOptions> for ErrorParts {
    fn from(options: FormatOptions) -> Self {
        let mut parts = Self::empty();
        if options.show_class {
            parts |= Self::CLASS;
        }
        if options.show_message {
            parts |= Self::MESSAGE;
        }
        if options.show_cause_chain {
            parts |= Self::CAUSE_CHAIN;
        }
        if options.show_stack_trace {
            parts |= Self::STACK;
        }
        parts
    }
}

/// What the caller asked the formatter for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormatRequest {
    /// No request was supplied
    #[default]
    Default,
    /// A bitmask request
    Parts(ErrorParts),
    /// A structured request, possibly partial
    Options(PartialFormatOptions),
}

impl FormatRequest {
    /// Resolve the request against the default options
    pub fn resolve(&self) -> FormatOptions {
        match self {
            Self::Default => FormatOptions::default(),
            Self::Parts(parts) => FormatOptions::from(*parts),
            Self::Options(partial) => FormatOptions::merged(partial),
        }
    }
}

impl From<ErrorParts> for FormatRequest {
    fn from(parts: ErrorParts) -> Self {
        Self::Parts(parts)
    }
}

impl From<PartialFormatOptions> for FormatRequest {
    fn from(partial: PartialFormatOptions) -> Self {
        Self::Options(partial)
    }
}

impl From<FormatOptions> for FormatRequest {
    fn from(options: FormatOptions) -> Self {
        Self::Options(options.into())
    }
}

impl From<Option<PartialFormatOptions>> for FormatRequest {
    fn from(partial: Option<PartialFormatOptions>) -> Self {
        partial.map_or(Self::Default, Self::Options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = FormatOptions::default();
        assert!(options.show_class);
        assert!(options.show_message);
        assert!(!options.show_cause_chain);
        assert!(!options.show_stack_trace);
    }

    #[test]
    fn test_builder() {
        let options = FormatOptions::new()
            .with_class(false)
            .with_cause_chain(true)
            .with_stack_trace(true);

        assert!(!options.show_class);
        assert!(options.show_message);
        assert!(options.show_cause_chain);
        assert!(options.show_stack_trace);
    }

    #[test]
    fn test_validate_success() {
        assert!(FormatOptions::default().validate().is_ok());
        assert!(FormatOptions::new().with_message(false).validate().is_ok());
        assert!(FormatOptions::new().with_class(false).validate().is_ok());
    }

    #[test]
    fn test_validate_failure() {
        let options = FormatOptions::ALL.with_class(false).with_message(false);
        let err = options.validate().unwrap_err();

        assert_eq!(err, FormatError::Configuration(NOTHING_REQUESTED.to_string()));
        assert!(err.to_string().starts_with("Cannot format"));
    }

    #[test]
    fn test_partial_merge_over_defaults() {
        let partial = PartialFormatOptions {
            show_cause_chain: Some(true),
            ..Default::default()
        };
        let options = FormatOptions::merged(&partial);

        assert_eq!(options, FormatOptions::default().with_cause_chain(true));
    }

    #[test]
    fn test_partial_deserialize() {
        let partial: PartialFormatOptions =
            serde_json::from_str(r#"{"show_class": false, "show_stack_trace": true}"#).unwrap();

        assert_eq!(partial.show_class, Some(false));
        assert_eq!(partial.show_message, None);
        assert_eq!(
            FormatOptions::merged(&partial),
            FormatOptions::new().with_class(false).with_stack_trace(true)
        );
    }

    #[test]
    fn test_full_options_deserialize_with_defaults() {
        let options: FormatOptions = serde_json::from_str(r#"{"show_cause_chain": true}"#).unwrap();
        assert_eq!(options, FormatOptions::default().with_cause_chain(true));
    }

    #[test]
    fn test_parts_composition() {
        assert_eq!(ErrorParts::CORE, ErrorParts::CLASS | ErrorParts::MESSAGE);
        assert_eq!(ErrorParts::MAIN.bits(), 7);
        assert_eq!(ErrorParts::ALL.bits(), 15);
        assert!(ErrorParts::ALL.contains(ErrorParts::STACK));
        assert!(!ErrorParts::MAIN.contains(ErrorParts::STACK));
        assert_eq!(ErrorParts::default(), ErrorParts::CORE);
    }

    #[test]
    fn test_parts_and_options_agree() {
        assert_eq!(FormatOptions::from(ErrorParts::CORE), FormatOptions::default());
        assert_eq!(FormatOptions::from(ErrorParts::ALL), FormatOptions::ALL);
        assert_eq!(ErrorParts::from(FormatOptions::ALL), ErrorParts::ALL);

        let only_chain = FormatOptions::from(ErrorParts::CAUSE_CHAIN | ErrorParts::STACK);
        assert!(only_chain.validate().is_err());
    }

    #[test]
    fn test_request_resolution() {
        assert_eq!(FormatRequest::default().resolve(), FormatOptions::default());
        assert_eq!(
            FormatRequest::from(ErrorParts::MESSAGE).resolve(),
            FormatOptions::new().with_class(false)
        );
        assert_eq!(FormatRequest::from(None).resolve(), FormatOptions::default());
        assert_eq!(FormatRequest::from(FormatOptions::ALL).resolve(), FormatOptions::ALL);
    }
}
