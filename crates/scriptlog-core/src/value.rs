//! The formattable value model.
//!
//! [`Value`] is the tagged union every formatter entry point accepts. Scalars
//! are stored inline; arrays and objects live behind shared, interior-mutable
//! handles ([`ArrayRef`], [`ObjectRef`]) so that callers can build graphs that
//! refer back to themselves. The address of the shared cell is the identity
//! used for cycle detection.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use chrono::{DateTime, Utc};

use crate::custom::CustomInspectable;

/// A value that can be formatted or inspected.
#[derive(Clone)]
pub enum Value {
    /// The absence of a value.
    Undefined,
    /// An explicit null.
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    /// A point in time. `None` is an invalid date.
    Date(Option<DateTime<Utc>>),
    RegExp(RegExp),
    Function(Function),
    Error(ErrorValue),
    Array(ArrayRef),
    Object(ObjectRef),
    /// A value that knows how to describe itself.
    Custom(Rc<dyn CustomInspectable>),
}

impl Value {
    /// Create an array value from anything convertible into values.
    #[must_use]
    pub fn array<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Array(ArrayRef::new(items.into_iter().map(Into::into).collect()))
    }

    /// Create an object value from key/value pairs.
    #[must_use]
    pub fn object<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let object = ObjectRef::new();
        for (key, value) in entries {
            object.set(key, value);
        }
        Value::Object(object)
    }

    /// Create a function value with an optional name.
    #[must_use]
    pub fn function(name: impl Into<String>) -> Self {
        let name = name.into();
        Value::Function(Function {
            name: (!name.is_empty()).then_some(name),
        })
    }

    /// Create a regular-expression literal value.
    #[must_use]
    pub fn regexp(source: impl Into<String>, flags: impl Into<String>) -> Self {
        Value::RegExp(RegExp {
            source: source.into(),
            flags: flags.into(),
        })
    }

    /// Create an error value.
    #[must_use]
    pub fn error(name: impl Into<String>, message: impl Into<String>) -> Self {
        Value::Error(ErrorValue::new(name, message))
    }

    /// Wrap a custom inspectable value.
    #[must_use]
    pub fn custom<C: CustomInspectable + 'static>(custom: C) -> Self {
        Value::Custom(Rc::new(custom))
    }

    #[must_use]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[must_use]
    pub fn is_boolean(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[must_use]
    pub fn is_function(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    /// True for non-null object kinds: arrays, objects, dates, regular
    /// expressions, errors and custom values. Functions are not objects here.
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(
            self,
            Value::Array(_)
                | Value::Object(_)
                | Value::Date(_)
                | Value::RegExp(_)
                | Value::Error(_)
                | Value::Custom(_)
        )
    }

    /// Identity of a shared value, used by the cycle guards.
    #[must_use]
    pub fn identity(&self) -> Option<usize> {
        match self {
            Value::Array(array) => Some(array.id()),
            Value::Object(object) => Some(object.id()),
            Value::Custom(custom) => Some(Rc::as_ptr(custom).cast::<()>() as usize),
            _ => None,
        }
    }

    /// Borrow the string contents, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::inspect(self, crate::InspectOptions::default()))
    }
}

/// String coercion, the same text `%s` substitutes.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::coerce::to_js_string(self))
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Undefined
    }
}

// ─────────────────────────────────────────────────────────
// Leaf kinds
// ─────────────────────────────────────────────────────────

/// A regular-expression literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegExp {
    pub source: String,
    pub flags: String,
}

impl fmt::Display for RegExp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags)
    }
}

/// A callable, known only by its name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Function {
    pub name: Option<String>,
}

/// An error object: name, message and an optional captured stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorValue {
    pub name: String,
    pub message: String,
    pub stack: Option<String>,
}

impl ErrorValue {
    #[must_use]
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            stack: None,
        }
    }

    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }
}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}: {}", self.name, self.message)
        }
    }
}

// ─────────────────────────────────────────────────────────
// Shared composites
// ─────────────────────────────────────────────────────────

/// Shared handle to an ordered list of values.
#[derive(Clone, Default)]
pub struct ArrayRef(Rc<RefCell<Vec<Value>>>);

impl ArrayRef {
    #[must_use]
    pub fn new(items: Vec<Value>) -> Self {
        Self(Rc::new(RefCell::new(items)))
    }

    pub fn push(&self, value: impl Into<Value>) {
        self.0.borrow_mut().push(value.into());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index).cloned()
    }

    /// Borrow the items. Do not hold the borrow across a `push`.
    #[must_use]
    pub fn items(&self) -> Ref<'_, Vec<Value>> {
        self.0.borrow()
    }

    /// Snapshot of the items, safe to iterate while the array is mutated.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }

    #[must_use]
    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.0).cast::<()>() as usize
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &ArrayRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Contents of an object value.
#[derive(Clone, Default)]
pub struct ObjectData {
    /// Constructor-like name shown before the braces. `None` for plain objects.
    pub class_name: Option<String>,
    /// Enumerable properties in insertion order.
    pub properties: Vec<(String, Value)>,
    /// Non-enumerable properties, shown only with `show_hidden`.
    pub hidden: Vec<(String, Value)>,
}

/// Shared handle to an object.
#[derive(Clone, Default)]
pub struct ObjectRef(Rc<RefCell<ObjectData>>);

impl ObjectRef {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty object carrying a class name.
    #[must_use]
    pub fn with_class(name: impl Into<String>) -> Self {
        let object = Self::new();
        object.0.borrow_mut().class_name = Some(name.into());
        object
    }

    /// Insert or replace an enumerable property, keeping its original position.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) {
        upsert(&mut self.0.borrow_mut().properties, key.into(), value.into());
    }

    /// Insert or replace a non-enumerable property.
    pub fn set_hidden(&self, key: impl Into<String>, value: impl Into<Value>) {
        upsert(&mut self.0.borrow_mut().hidden, key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        let data = self.0.borrow();
        data.properties
            .iter()
            .chain(data.hidden.iter())
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    #[must_use]
    pub fn class_name(&self) -> Option<String> {
        self.0.borrow().class_name.clone()
    }

    /// Number of enumerable properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.borrow().properties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().properties.is_empty()
    }

    #[must_use]
    pub fn data(&self) -> Ref<'_, ObjectData> {
        self.0.borrow()
    }

    #[must_use]
    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.0).cast::<()>() as usize
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

fn upsert(entries: &mut Vec<(String, Value)>, key: String, value: Value) {
    if let Some(slot) = entries.iter_mut().find(|(k, _)| *k == key) {
        slot.1 = value;
    } else {
        entries.push((key, value));
    }
}

// ─────────────────────────────────────────────────────────
// Conversions
// ─────────────────────────────────────────────────────────

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Number(f64::from(value))
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Number(value as f64)
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::String(value.clone())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Date(Some(value))
    }
}

impl From<ErrorValue> for Value {
    fn from(value: ErrorValue) -> Self {
        Value::Error(value)
    }
}

impl From<RegExp> for Value {
    fn from(value: RegExp) -> Self {
        Value::RegExp(value)
    }
}

impl From<ArrayRef> for Value {
    fn from(value: ArrayRef) -> Self {
        Value::Array(value)
    }
}

impl From<ObjectRef> for Value {
    fn from(value: ObjectRef) -> Self {
        Value::Object(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(ArrayRef::new(value))
    }
}

/// `None` becomes `null`.
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<&serde_json::Value> for Value {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Array(items) => Value::array(items.iter().map(Value::from)),
            serde_json::Value::Object(map) => {
                Value::object(map.iter().map(|(k, v)| (k.clone(), Value::from(v))))
            }
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        Value::from(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        assert!(Value::Undefined.is_undefined());
        assert!(Value::Null.is_null());
        assert!(!Value::Null.is_object());
        assert!(Value::from("x").is_string());
        assert!(Value::from(true).is_boolean());
        assert!(Value::function("f").is_function());
        assert!(!Value::function("f").is_object());
        assert!(Value::array([1, 2]).is_object());
        assert!(Value::Date(None).is_object());
        assert!(Value::error("Error", "x").is_object());
    }

    #[test]
    fn test_object_set_replaces_in_place() {
        let object = ObjectRef::new();
        object.set("a", 1);
        object.set("b", 2);
        object.set("a", 3);
        let data = object.data();
        assert_eq!(data.properties.len(), 2);
        assert_eq!(data.properties[0].0, "a");
        assert!(matches!(data.properties[0].1, Value::Number(n) if n == 3.0));
    }

    #[test]
    fn test_identity_is_shared_between_clones() {
        let array = ArrayRef::new(vec![]);
        let clone = array.clone();
        assert!(array.ptr_eq(&clone));
        assert_eq!(Value::from(array).identity(), Value::from(clone).identity());
        assert_ne!(
            Value::array(Vec::<Value>::new()).identity(),
            Value::array(Vec::<Value>::new()).identity()
        );
    }

    #[test]
    fn test_hidden_properties_are_not_counted() {
        let object = ObjectRef::new();
        object.set_hidden("secret", 1);
        assert!(object.is_empty());
        assert!(object.get("secret").is_some());
    }

    #[test]
    fn test_from_json() {
        let json = serde_json::json!({ "a": [1, "two", null], "b": true });
        let value = Value::from(json);
        let Value::Object(object) = value else {
            panic!("expected object");
        };
        assert_eq!(object.len(), 2);
        assert!(matches!(object.get("a"), Some(Value::Array(a)) if a.len() == 3));
    }

    #[test]
    fn test_function_without_name() {
        assert!(matches!(Value::function(""), Value::Function(Function { name: None })));
    }

    #[test]
    fn test_option_conversion() {
        assert!(Value::from(None::<i32>).is_null());
        assert!(Value::from(Some("x")).is_string());
    }
}
