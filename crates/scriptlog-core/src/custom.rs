//! Opt-in self-description for values.

use crate::inspect::InspectContext;
use crate::value::{ObjectRef, Value};

/// What a [`CustomInspectable`] hands back to the inspector.
#[derive(Debug)]
pub enum Inspected {
    /// Final text, used verbatim.
    Text(String),
    /// Another value, inspected in turn with the same context.
    Value(Value),
}

impl From<String> for Inspected {
    fn from(text: String) -> Self {
        Inspected::Text(text)
    }
}

impl From<&str> for Inspected {
    fn from(text: &str) -> Self {
        Inspected::Text(text.to_string())
    }
}

impl From<Value> for Inspected {
    fn from(value: Value) -> Self {
        Inspected::Value(value)
    }
}

/// A value that controls how `inspect` renders it.
///
/// The hook is consulted only while `custom_inspect` is enabled. With the hook
/// disabled the inspector falls back to [`CustomInspectable::structural`].
///
/// ```
/// use scriptlog_core::{CustomInspectable, InspectContext, Inspected, InspectOptions, Value, inspect};
///
/// struct Money(i64);
///
/// impl CustomInspectable for Money {
///     fn inspect(&self, _recurse_times: Option<isize>, _ctx: &mut InspectContext) -> Inspected {
///         format!("${}.{:02}", self.0 / 100, self.0 % 100).into()
///     }
/// }
///
/// assert_eq!(inspect(&Value::custom(Money(1234)), InspectOptions::default()), "$12.34");
/// ```
pub trait CustomInspectable {
    /// Describe this value. `recurse_times` is the remaining depth (`None`
    /// when unlimited); nested values can be rendered through
    /// [`InspectContext::format_value`].
    fn inspect(&self, recurse_times: Option<isize>, ctx: &mut InspectContext) -> Inspected;

    /// Name used by the default structural form.
    fn type_name(&self) -> &str {
        "Object"
    }

    /// Plain representation used when custom inspection is turned off.
    fn structural(&self) -> Value {
        Value::Object(ObjectRef::with_class(self.type_name()))
    }

    /// JSON form for `%j`. `None` serializes [`CustomInspectable::structural`].
    fn to_json(&self) -> Option<serde_json::Value> {
        None
    }

    /// String coercion used by `%s` and leftover primitives.
    fn to_display(&self) -> String {
        "[object Object]".to_string()
    }
}
