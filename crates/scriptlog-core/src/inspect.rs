//! Deep inspection of values.
//!
//! [`inspect`] renders any [`Value`] as readable text:
//!
//! ```text
//! { name: 'scriptlog', tags: [ 'a', 'b' ], nested: { deeper: [Object] } }
//! ```
//!
//! Recursion is bounded by [`Depth`], cycles are detected by identity and
//! rendered as `[Circular]`, and terminal tokens are wrapped in ANSI colours
//! when `colors` is on.

use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::SecondsFormat;
use regex::Regex;

use crate::coerce::{number_to_string, quote_string};
use crate::custom::Inspected;
use crate::theme::{StyleKind, theme};
use crate::value::{ArrayRef, ObjectRef, Value};

/// Entries are broken one per line once their combined width passes this.
const BREAK_LENGTH: usize = 60;

static ANSI_SGR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[\d\d?m").expect("valid SGR pattern"));

/// How far into nested composites to descend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Depth {
    /// Expand this many levels below the top before abbreviating. A negative
    /// limit abbreviates the top-level composite itself.
    Limited(isize),
    Unlimited,
}

impl Default for Depth {
    fn default() -> Self {
        Depth::Limited(2)
    }
}

impl Depth {
    /// Starting `recurse_times` for a traversal.
    #[must_use]
    pub fn recurse_times(self) -> Option<isize> {
        match self {
            Depth::Limited(n) => Some(n),
            Depth::Unlimited => None,
        }
    }
}

/// Options for a single [`inspect`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InspectOptions {
    /// Include non-enumerable properties.
    pub show_hidden: bool,
    pub depth: Depth,
    /// Wrap terminal tokens in ANSI colours.
    pub colors: bool,
    /// Consult [`crate::CustomInspectable`] hooks.
    pub custom_inspect: bool,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self {
            show_hidden: false,
            depth: Depth::default(),
            colors: false,
            custom_inspect: true,
        }
    }
}

impl InspectOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Positional form: `show_hidden`, then optional depth and colours.
    #[must_use]
    pub fn legacy(show_hidden: bool, depth: Option<Depth>, colors: Option<bool>) -> Self {
        Self {
            show_hidden,
            depth: depth.unwrap_or_default(),
            colors: colors.unwrap_or(false),
            custom_inspect: true,
        }
    }

    /// Read overrides from an options object.
    ///
    /// Recognised keys are `showHidden`, `depth`, `colors` and
    /// `customInspect`. A `null` or infinite depth means unlimited. Anything
    /// that is not an object, and keys of the wrong type, leave the defaults.
    #[must_use]
    pub fn from_value(options: &Value) -> Self {
        let mut resolved = Self::default();
        let Value::Object(object) = options else {
            return resolved;
        };

        if let Some(Value::Bool(b)) = object.get("showHidden") {
            resolved.show_hidden = b;
        }
        match object.get("depth") {
            Some(Value::Null) => resolved.depth = Depth::Unlimited,
            Some(Value::Number(n)) if n.is_infinite() => resolved.depth = Depth::Unlimited,
            Some(Value::Number(n)) if n.is_finite() => {
                resolved.depth = Depth::Limited(n.floor() as isize);
            }
            _ => {}
        }
        if let Some(Value::Bool(b)) = object.get("colors") {
            resolved.colors = b;
        }
        if let Some(Value::Bool(b)) = object.get("customInspect") {
            resolved.custom_inspect = b;
        }
        resolved
    }

    #[must_use]
    pub fn show_hidden(mut self, show: bool) -> Self {
        self.show_hidden = show;
        self
    }

    #[must_use]
    pub fn depth(mut self, depth: Depth) -> Self {
        self.depth = depth;
        self
    }

    /// Never abbreviate nested values.
    #[must_use]
    pub fn unlimited(self) -> Self {
        self.depth(Depth::Unlimited)
    }

    #[must_use]
    pub fn colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    #[must_use]
    pub fn custom_inspect(mut self, enabled: bool) -> Self {
        self.custom_inspect = enabled;
        self
    }
}

/// A bare boolean is the legacy `show_hidden` flag.
impl From<bool> for InspectOptions {
    fn from(show_hidden: bool) -> Self {
        Self::default().show_hidden(show_hidden)
    }
}

impl From<&Value> for InspectOptions {
    fn from(options: &Value) -> Self {
        Self::from_value(options)
    }
}

/// State for one inspection: the options plus the identities of the
/// composites currently being rendered.
#[derive(Debug)]
pub struct InspectContext {
    options: InspectOptions,
    seen: HashSet<usize>,
}

impl InspectContext {
    #[must_use]
    pub fn new(options: InspectOptions) -> Self {
        Self {
            options,
            seen: HashSet::new(),
        }
    }

    #[must_use]
    pub fn options(&self) -> &InspectOptions {
        &self.options
    }

    /// Colour `text` for `kind` when colours are on.
    #[must_use]
    pub fn stylize(&self, text: &str, kind: StyleKind) -> String {
        if self.options.colors {
            theme().stylize(text, kind)
        } else {
            text.to_string()
        }
    }

    /// Render `value` with `recurse_times` levels left (`None` = unlimited).
    pub fn format_value(&mut self, value: &Value, recurse_times: Option<isize>) -> String {
        if let Some(id) = value.identity() {
            if self.seen.contains(&id) {
                return self.stylize("[Circular]", StyleKind::Special);
            }
        }

        match value {
            Value::Custom(custom) => {
                let Some(id) = value.identity() else {
                    return String::new();
                };
                self.seen.insert(id);
                let rendered = if self.options.custom_inspect {
                    match custom.inspect(recurse_times, self) {
                        Inspected::Text(text) => text,
                        Inspected::Value(other) => self.format_value(&other, recurse_times),
                    }
                } else {
                    let structural = custom.structural();
                    self.format_value(&structural, recurse_times)
                };
                self.seen.remove(&id);
                rendered
            }
            Value::Undefined => self.stylize("undefined", StyleKind::Undefined),
            Value::Null => self.stylize("null", StyleKind::Null),
            Value::Bool(b) => self.stylize(&b.to_string(), StyleKind::Boolean),
            Value::Number(n) => {
                let text = if *n == 0.0 && n.is_sign_negative() {
                    "-0".to_string()
                } else {
                    number_to_string(*n)
                };
                self.stylize(&text, StyleKind::Number)
            }
            Value::String(s) => self.stylize(&quote_string(s), StyleKind::String),
            Value::Function(f) => {
                let text = match &f.name {
                    Some(name) => format!("[Function: {name}]"),
                    None => "[Function]".to_string(),
                };
                self.stylize(&text, StyleKind::Special)
            }
            Value::RegExp(re) => self.stylize(&re.to_string(), StyleKind::RegExp),
            Value::Date(Some(date)) => self.stylize(
                &date.to_rfc3339_opts(SecondsFormat::Millis, true),
                StyleKind::Date,
            ),
            Value::Date(None) => self.stylize("Invalid Date", StyleKind::Date),
            Value::Error(e) => match &e.stack {
                Some(stack) => stack.clone(),
                None => format!("[{e}]"),
            },
            Value::Array(array) => self.format_array(array, recurse_times),
            Value::Object(object) => self.format_object(object, recurse_times),
        }
    }

    fn format_array(&mut self, array: &ArrayRef, recurse_times: Option<isize>) -> String {
        let items = array.to_vec();
        if items.is_empty() {
            return "[]".to_string();
        }
        if is_exhausted(recurse_times) {
            return self.stylize("[...]", StyleKind::Special);
        }

        self.seen.insert(array.id());
        let child = recurse_times.map(|n| n - 1);
        let output: Vec<String> = items
            .iter()
            .map(|item| {
                let rendered = self.format_value(item, child);
                indent_continuation(&rendered)
            })
            .collect();
        self.seen.remove(&array.id());

        reduce_to_single_string(&output, "[", "]")
    }

    fn format_object(&mut self, object: &ObjectRef, recurse_times: Option<isize>) -> String {
        let (class_name, entries) = {
            let data = object.data();
            let mut entries: Vec<(String, Value, bool)> = data
                .properties
                .iter()
                .map(|(k, v)| (k.clone(), v.clone(), false))
                .collect();
            if self.options.show_hidden {
                entries.extend(data.hidden.iter().map(|(k, v)| (k.clone(), v.clone(), true)));
            }
            (data.class_name.clone(), entries)
        };

        let open = match class_name.as_deref() {
            Some(name) if name != "Object" => format!("{name} {{"),
            _ => "{".to_string(),
        };
        if entries.is_empty() {
            return format!("{open}}}");
        }
        if is_exhausted(recurse_times) {
            return self.stylize("[Object]", StyleKind::Special);
        }

        self.seen.insert(object.id());
        let child = recurse_times.map(|n| n - 1);
        let output: Vec<String> = entries
            .iter()
            .map(|(key, value, hidden)| {
                let name = self.format_key(key);
                let name = if *hidden { format!("[{name}]") } else { name };
                let rendered = self.format_value(value, child);
                format!("{name}: {}", indent_continuation(&rendered))
            })
            .collect();
        self.seen.remove(&object.id());

        reduce_to_single_string(&output, &open, "}")
    }

    fn format_key(&self, key: &str) -> String {
        if is_identifier(key) {
            self.stylize(key, StyleKind::Name)
        } else {
            self.stylize(&quote_string(key), StyleKind::String)
        }
    }
}

/// Inspect `value` with the given options.
///
/// ```
/// use scriptlog_core::{inspect, Depth, InspectOptions, Value};
///
/// let value = Value::object([("a", Value::array([1, 2]))]);
/// assert_eq!(inspect(&value, InspectOptions::default()), "{ a: [ 1, 2 ] }");
/// assert_eq!(inspect(&value, InspectOptions::new().depth(Depth::Limited(0))), "{ a: [...] }");
/// ```
#[must_use]
pub fn inspect(value: &Value, options: impl Into<InspectOptions>) -> String {
    let options = options.into();
    let mut ctx = InspectContext::new(options);
    ctx.format_value(value, options.depth.recurse_times())
}

/// Positional form of [`inspect`].
#[must_use]
pub fn inspect_legacy(
    value: &Value,
    show_hidden: bool,
    depth: Option<Depth>,
    colors: Option<bool>,
) -> String {
    inspect(value, InspectOptions::legacy(show_hidden, depth, colors))
}

fn is_exhausted(recurse_times: Option<isize>) -> bool {
    recurse_times.is_some_and(|n| n < 0)
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn indent_continuation(rendered: &str) -> String {
    if rendered.contains('\n') {
        rendered.replace('\n', "\n  ")
    } else {
        rendered.to_string()
    }
}

fn visible_len(text: &str) -> usize {
    ANSI_SGR.replace_all(text, "").chars().count()
}

fn reduce_to_single_string(output: &[String], open: &str, close: &str) -> String {
    let length: usize = output.iter().map(|part| visible_len(part) + 1).sum();
    if length > BREAK_LENGTH {
        format!("{open} {} {close}", output.join(",\n  "))
    } else {
        format!("{open} {} {close}", output.join(", "))
    }
}
