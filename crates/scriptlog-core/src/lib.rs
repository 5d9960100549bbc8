//! Value inspection and printf-style formatting for scriptlog.
//!
//! This crate is the formatting engine behind the scriptlog `Logger`:
//! - [`Value`], the tagged union of everything that can be logged
//! - [`format`] for `%s`/`%d`/`%j`/`%%` templates over a value sequence
//! - [`inspect`] for depth-limited, cycle-safe, optionally coloured rendering
//! - [`CustomInspectable`] for values that describe themselves
//!
//! ```
//! use scriptlog_core::{format, inspect, values, InspectOptions, Value};
//!
//! let user = Value::object([("name", Value::from("ada")), ("id", Value::from(7))]);
//! assert_eq!(format(&values!["user %s:", "ada", user.clone()]), "user ada: { name: 'ada', id: 7 }");
//! assert_eq!(inspect(&user, InspectOptions::default()), "{ name: 'ada', id: 7 }");
//! ```

#![forbid(unsafe_code)]

pub mod coerce;
mod custom;
mod error;
mod format;
mod inspect;
mod json;
pub mod logging;
pub mod theme;
mod value;

pub use custom::{CustomInspectable, Inspected};
pub use error::{FormatError, FormatResult};
pub use format::format;
pub use inspect::{Depth, InspectContext, InspectOptions, inspect, inspect_legacy};
pub use json::json_stringify;
pub use theme::{AnsiColor, StyleKind};
pub use value::{ArrayRef, ErrorValue, Function, ObjectData, ObjectRef, RegExp, Value};

/// True for [`Value::Undefined`].
#[must_use]
pub fn is_undefined(value: &Value) -> bool {
    value.is_undefined()
}

#[must_use]
pub fn is_string(value: &Value) -> bool {
    value.is_string()
}

#[must_use]
pub fn is_function(value: &Value) -> bool {
    value.is_function()
}

/// True for non-null object kinds (see [`Value::is_object`]).
#[must_use]
pub fn is_object(value: &Value) -> bool {
    value.is_object()
}

#[must_use]
pub fn is_boolean(value: &Value) -> bool {
    value.is_boolean()
}

#[must_use]
pub fn is_null(value: &Value) -> bool {
    value.is_null()
}

/// Build a `Vec<Value>` from heterogeneous expressions.
///
/// ```
/// use scriptlog_core::{values, Value};
///
/// let args = values!["%s=%d", "x", 3];
/// assert_eq!(args.len(), 3);
/// assert!(matches!(args[2], Value::Number(_)));
/// ```
#[macro_export]
macro_rules! values {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($value)),+]
    };
}
