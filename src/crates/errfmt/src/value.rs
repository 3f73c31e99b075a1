//! Formattable values
//!
//! A [`Value`] is anything a caller may hand to the formatter: either a
//! structured [`ErrorObject`] or a plain value that is only known by its
//! string conversion.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error as StdError;
use std::fmt;

/// Class name given to errors whose concrete type is unknown
pub const GENERIC_CLASS_NAME: &str = "Error";

/// A structured error: class name, message, optional cause and stack trace
///
/// The cause is a raw [`Value`], so it is not necessarily an error itself.
/// Causes are owned, which means a cause chain always ends. Formatting,
/// cloning, comparing and dropping walk the chain recursively, so its depth
/// is bounded by the thread's stack size.
///
/// # Example
///
/// ```rust
/// use errfmt::ErrorObject;
///
/// let error = ErrorObject::new("RangeError", "out of range")
///     .with_cause(ErrorObject::generic("index was 12"))
///     .with_stack("at main (src/main.rs:3:5)");
///
/// assert_eq!(error.class_name(), "RangeError");
/// assert_eq!(error.message(), "out of range");
/// assert!(error.cause().is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorObject {
    class_name: String,
    message: String,
    cause: Option<Box<Value>>,
    stack: Option<String>,
}

impl ErrorObject {
    /// Create an error with the given class name and message
    pub fn new(class_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            message: message.into(),
            cause: None,
            stack: None,
        }
    }

    /// Create an error of the generic `Error` class
    pub fn generic(message: impl Into<String>) -> Self {
        Self::new(GENERIC_CLASS_NAME, message)
    }

    /// Set the cause of this error
    pub fn with_cause(mut self, cause: impl Into<Value>) -> Self {
        self.cause = Some(Box::new(cause.into()));
        self
    }

    /// Set the stack trace text of this error
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Record the current call stack as this error's stack trace
    pub fn capture_stack(self) -> Self {
        let backtrace = Backtrace::force_capture();
        self.with_stack(backtrace.to_string())
    }

    /// Convert a standard library error, including its whole `source()` chain
    ///
    /// The top-level class name is the short type name of `E`. Sources are
    /// only reachable as trait objects, so they get the generic class name.
    pub fn from_std_error<E>(error: &E) -> Self
    where
        E: StdError + ?Sized,
    {
        let mut messages = Vec::new();
        let mut current = error.source();

        while let Some(source) = current {
            messages.push(source.to_string());
            current = source.source();
        }

        let mut converted = Self::new(
            short_type_name(std::any::type_name::<E>()),
            error.to_string(),
        );
        converted.cause = chain_from_messages(messages).map(|cause| Box::new(Value::Error(cause)));
        converted
    }

    /// The error's concrete type name
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// The error's message, possibly empty
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The value this error was caused by, if any
    pub fn cause(&self) -> Option<&Value> {
        self.cause.as_deref()
    }

    /// The stack trace text, if any
    pub fn stack(&self) -> Option<&str> {
        self.stack.as_deref()
    }
}

impl fmt::Display for ErrorObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.class_name)
        } else {
            write!(f, "{}: {}", self.class_name, self.message)
        }
    }
}

impl From<&anyhow::Error> for ErrorObject {
    fn from(error: &anyhow::Error) -> Self {
        let messages = error.chain().map(|e| e.to_string()).collect();
        let mut converted =
            chain_from_messages(messages).unwrap_or_else(|| Self::generic(error.to_string()));

        let backtrace = error.backtrace();
        if backtrace.status() == BacktraceStatus::Captured {
            converted.stack = Some(backtrace.to_string());
        }

        converted
    }
}

impl From<anyhow::Error> for ErrorObject {
    fn from(error: anyhow::Error) -> Self {
        Self::from(&error)
    }
}

/// Build a chain of generic errors, outermost message first
fn chain_from_messages(messages: Vec<String>) -> Option<ErrorObject> {
    messages
        .into_iter()
        .rev()
        .fold(None, |cause: Option<ErrorObject>, message| {
            let mut error = ErrorObject::generic(message);
            error.cause = cause.map(|c| Box::new(Value::Error(c)));
            Some(error)
        })
}

/// Strip module path, generic arguments and trait object decoration
fn short_type_name(full: &str) -> &str {
    let path = full.split('<').next().unwrap_or(full);
    let path = path.trim_start_matches("dyn ");
    let path = path.split(" + ").next().unwrap_or(path);
    path.rsplit("::").next().unwrap_or(path)
}

/// Anything that can be handed to the formatter
///
/// `Display` is the plain string conversion used for non-error values.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A structured error
    Error(ErrorObject),
    /// An explicit null
    Null,
    /// An absent value
    Undefined,
    /// A boolean
    Bool(bool),
    /// An integer, kept exact
    Integer(i128),
    /// A floating-point number
    Number(f64),
    /// A string
    String(String),
    /// Any other object, known only by its string conversion
    Opaque(String),
}

impl Value {
    /// Capture an arbitrary displayable object by its string conversion
    pub fn opaque(value: impl fmt::Display) -> Self {
        Self::Opaque(value.to_string())
    }

    /// The structured error, when this value is one
    pub fn as_error(&self) -> Option<&ErrorObject> {
        match self {
            Self::Error(error) => Some(error),
            _ => None,
        }
    }

    /// Whether this value is a structured error
    pub fn is_error(&self) -> bool {
        self.as_error().is_some()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error(error) => fmt::Display::fmt(error, f),
            Self::Null => f.write_str("null"),
            Self::Undefined => f.write_str("undefined"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Number(n) => write_number(*n, f),
            Self::String(s) | Self::Opaque(s) => f.write_str(s),
        }
    }
}

fn write_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n == 0.0 {
        // -0 prints as 0
        f.write_str("0")
    } else if (1e-6..1e21).contains(&n.abs()) {
        write!(f, "{n}")
    } else {
        // 1e21 -> 1e+21, 1.5e-7 stays as is
        let exp = format!("{n:e}");
        match exp.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                write!(f, "{mantissa}e+{exponent}")
            }
            _ => f.write_str(&exp),
        }
    }
}

impl From<ErrorObject> for Value {
    fn from(error: ErrorObject) -> Self {
        Self::Error(error)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Self::Integer(n as i128)
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Undefined, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Integer(i.into())
                } else if let Some(u) = n.as_u64() {
                    Self::Integer(u.into())
                } else if let Some(f) = n.as_f64() {
                    Self::Number(f)
                } else {
                    Self::Opaque(n.to_string())
                }
            }
            serde_json::Value::String(s) => Self::String(s),
            other => Self::Opaque(other.to_string()),
        }
    }
}
