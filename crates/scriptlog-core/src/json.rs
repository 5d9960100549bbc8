//! JSON serialization for `%j`.
//!
//! Output is built by hand so object keys keep their insertion order; string
//! escaping is delegated to `serde_json`.

use std::collections::HashSet;

use crate::coerce::number_to_string;
use crate::error::{FormatError, FormatResult};
use crate::value::Value;

/// Serialize `value` as compact JSON.
///
/// Returns `Ok(None)` for values JSON has no representation for (undefined,
/// functions) and [`FormatError::Circular`] when the value refers back to
/// itself.
///
/// ```
/// use scriptlog_core::{json_stringify, Value};
///
/// let value = Value::object([("a", 1)]);
/// assert_eq!(json_stringify(&value).unwrap().as_deref(), Some(r#"{"a":1}"#));
/// assert_eq!(json_stringify(&Value::Undefined).unwrap(), None);
/// ```
pub fn json_stringify(value: &Value) -> FormatResult<Option<String>> {
    let mut writer = JsonWriter::default();
    if writer.write_value(value)? {
        Ok(Some(writer.out))
    } else {
        Ok(None)
    }
}

#[derive(Default)]
struct JsonWriter {
    out: String,
    stack: HashSet<usize>,
}

impl JsonWriter {
    /// Append `value`; returns false (writing nothing) when it has no JSON form.
    fn write_value(&mut self, value: &Value) -> FormatResult<bool> {
        match value {
            Value::Undefined | Value::Function(_) => return Ok(false),
            Value::Null => self.out.push_str("null"),
            Value::Bool(b) => self.out.push_str(if *b { "true" } else { "false" }),
            Value::Number(n) if n.is_finite() => self.out.push_str(&number_to_string(*n)),
            Value::Number(_) => self.out.push_str("null"),
            Value::String(s) => self.write_string(s)?,
            Value::Date(Some(date)) => {
                let iso = date.to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
                self.write_string(&iso)?;
            }
            Value::Date(None) => self.out.push_str("null"),
            Value::RegExp(_) | Value::Error(_) => self.out.push_str("{}"),
            Value::Array(array) => {
                self.enter(array.id())?;
                self.out.push('[');
                for (i, item) in array.to_vec().iter().enumerate() {
                    if i > 0 {
                        self.out.push(',');
                    }
                    if !self.write_value(item)? {
                        self.out.push_str("null");
                    }
                }
                self.out.push(']');
                self.stack.remove(&array.id());
            }
            Value::Object(object) => {
                self.enter(object.id())?;
                let properties = object.data().properties.clone();
                self.out.push('{');
                let mut first = true;
                for (key, item) in &properties {
                    let mark = self.out.len();
                    if !first {
                        self.out.push(',');
                    }
                    self.write_string(key)?;
                    self.out.push(':');
                    if self.write_value(item)? {
                        first = false;
                    } else {
                        self.out.truncate(mark);
                    }
                }
                self.out.push('}');
                self.stack.remove(&object.id());
            }
            Value::Custom(custom) => {
                if let Some(json) = custom.to_json() {
                    return self.write_value(&Value::from(&json));
                }
                let id = value.identity().unwrap_or_default();
                self.enter(id)?;
                let written = self.write_value(&custom.structural())?;
                self.stack.remove(&id);
                return Ok(written);
            }
        }
        Ok(true)
    }

    fn write_string(&mut self, s: &str) -> FormatResult<()> {
        self.out.push_str(&serde_json::to_string(s)?);
        Ok(())
    }

    fn enter(&mut self, id: usize) -> FormatResult<()> {
        if self.stack.insert(id) {
            Ok(())
        } else {
            Err(FormatError::Circular)
        }
    }
}
