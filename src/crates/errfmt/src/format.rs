//! The error formatter
//!
//! Rendering appends fragments to an output buffer in order:
//!
//! - core info: `Class("message")`, `Class()`, `Class` or `message`
//! - cause chain: core infos joined by `". Cause: "`
//! - stack trace: a newline followed by the top-level error's stack

use crate::normalize::to_error;
use crate::options::{FormatOptions, FormatRequest};
use crate::value::{ErrorObject, Value};
use crate::Result;
use tracing::debug;

/// Separator between consecutive errors of a cause chain
pub const CAUSE_SEPARATOR: &str = ". Cause: ";

/// Format a value as a human-readable error description
///
/// When `value` is not a structured error and no request was supplied,
/// the plain string conversion of `value` is returned. Otherwise the
/// request is merged over the default options, validated, and the value
/// is normalized and rendered.
///
/// # Errors
///
/// Returns [`FormatError::Configuration`](crate::FormatError::Configuration)
/// when the effective options request neither the class nor the message.
///
/// # Example
///
/// ```rust
/// use errfmt::{format_error, ErrorObject, ErrorParts, FormatRequest, Value};
///
/// assert_eq!(format_error(&Value::from(90), FormatRequest::Default).unwrap(), "90");
///
/// let error = Value::from(
///     ErrorObject::new("URIError", "Alpha").with_cause(
///         ErrorObject::new("Error", "Beta").with_cause(ErrorObject::new("RangeError", "Gamma")),
///     ),
/// );
/// assert_eq!(
///     format_error(&error, ErrorParts::MESSAGE | ErrorParts::CAUSE_CHAIN).unwrap(),
///     "Alpha. Cause: Beta. Cause: Gamma"
/// );
/// ```
pub fn format_error(value: &Value, request: impl Into<FormatRequest>) -> Result<String> {
    let request = request.into();

    if !value.is_error() && request == FormatRequest::Default {
        return Ok(value.to_string());
    }

    let options = request.resolve();
    if let Err(err) = options.validate() {
        debug!("Rejected format request {:?}: {}", options, err);
        return Err(err);
    }

    let error = to_error(value);
    let mut buffer = String::new();

    render_main(&error, &options, &mut buffer);

    if options.show_stack_trace {
        render_stack_trace(&error, &mut buffer);
    }

    Ok(buffer)
}

/// Render an error followed, when requested, by its cause chain
///
/// An `Undefined` cause counts as no cause.
fn render_main(error: &ErrorObject, options: &FormatOptions, buffer: &mut String) {
    render_core(error, options, buffer);

    if options.show_cause_chain {
        if let Some(cause) = error.cause().filter(|c| !matches!(c, Value::Undefined)) {
            buffer.push_str(CAUSE_SEPARATOR);
            render_main(&to_error(cause), options, buffer);
        }
    }
}

/// Render the class name and/or message of a single error
///
/// Quotes surround the message only when it is non-empty.
fn render_core(error: &ErrorObject, options: &FormatOptions, buffer: &mut String) {
    let quoted = !error.message().is_empty();

    if options.show_class {
        buffer.push_str(error.class_name());

        if options.show_message {
            buffer.push('(');

            if quoted {
                buffer.push('"');
            }
        }
    }

    if options.show_message {
        buffer.push_str(error.message());

        if options.show_class {
            if quoted {
                buffer.push('"');
            }

            buffer.push(')');
        }
    }
}

/// Append the stack trace, if the error has a non-empty one
fn render_stack_trace(error: &ErrorObject, buffer: &mut String) {
    match error.stack() {
        Some(stack) if !stack.is_empty() => {
            buffer.push('\n');
            buffer.push_str(stack);
        }
        _ => {}
    }
}
