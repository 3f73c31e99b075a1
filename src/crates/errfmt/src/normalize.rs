//! Normalization of arbitrary values into error objects

use crate::value::{ErrorObject, Value};
use std::borrow::Cow;
use tracing::trace;

/// Convert any value into an error object
///
/// A structured error is returned as-is, borrowed from the input. Any other
/// value is wrapped into a generic `Error` whose message is the value's
/// string conversion; the wrapper has neither cause nor stack trace.
///
/// # Example
///
/// ```rust
/// use errfmt::{to_error, ErrorObject, Value};
///
/// assert_eq!(to_error(&Value::from(90)).into_owned(), ErrorObject::generic("90"));
/// assert_eq!(to_error(&Value::Null).message(), "null");
/// ```
pub fn to_error(value: &Value) -> Cow<'_, ErrorObject> {
    match value {
        Value::Error(error) => Cow::Borrowed(error),
        other => {
            trace!("Wrapping non-error value into a generic error");
            Cow::Owned(ErrorObject::generic(other.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_number() {
        assert_eq!(*to_error(&Value::from(90)), ErrorObject::generic("90"));
    }

    #[test]
    fn test_convert_string() {
        assert_eq!(*to_error(&Value::from("Dodo")), ErrorObject::generic("Dodo"));
    }

    #[test]
    fn test_convert_boolean() {
        assert_eq!(*to_error(&Value::from(true)), ErrorObject::generic("true"));
    }

    #[test]
    fn test_convert_null() {
        assert_eq!(*to_error(&Value::Null), ErrorObject::generic("null"));
    }

    #[test]
    fn test_convert_undefined() {
        assert_eq!(*to_error(&Value::Undefined), ErrorObject::generic("undefined"));
    }

    #[test]
    fn test_wrapped_value_has_no_cause_or_stack() {
        let value = Value::opaque("[object Object]");
        let error = to_error(&value);
        assert_eq!(error.class_name(), "Error");
        assert!(error.cause().is_none());
        assert!(error.stack().is_none());
    }

    #[test]
    fn test_error_is_left_as_it_is() {
        let value = Value::from(
            ErrorObject::generic("Alpha error").with_cause(ErrorObject::generic("Beta")),
        );
        let normalized = to_error(&value);

        assert!(matches!(normalized, Cow::Borrowed(_)));
        assert!(std::ptr::eq(&*normalized, value.as_error().unwrap()));
    }
}
