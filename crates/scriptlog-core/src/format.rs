//! printf-style formatting over a sequence of values.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::coerce::{number_to_string, to_js_string, to_number};
use crate::inspect::{InspectOptions, inspect};
use crate::json::json_stringify;
use crate::logging::targets;
use crate::value::Value;

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("%[sdj%]").expect("valid token pattern"));

/// Format `values` into one line.
///
/// A leading string is a template: `%s` substitutes the string form of the
/// next value, `%d` its numeric form, `%j` its JSON (or `[Circular]` when that
/// fails) and `%%` a literal percent sign. Tokens without a matching value
/// stay as written. Values left over are appended after single spaces:
/// object-like values inspected, everything else in string form.
///
/// Without a leading string every value is inspected and the results joined
/// with spaces.
///
/// ```
/// use scriptlog_core::{format, values};
///
/// assert_eq!(format(&values!["%s-%d", "a", 3]), "a-3");
/// assert_eq!(format(&values!["%s %s", "x"]), "x %s");
/// assert_eq!(format(&values!["100%%"]), "100%");
/// assert_eq!(format(&values![1, "a"]), "1 'a'");
/// ```
#[must_use]
pub fn format(values: &[Value]) -> String {
    let Some(Value::String(template)) = values.first() else {
        return values
            .iter()
            .map(|value| inspect(value, InspectOptions::default()))
            .collect::<Vec<_>>()
            .join(" ");
    };

    let mut index = 1;
    let mut out = TOKEN
        .replace_all(template, |caps: &Captures<'_>| {
            let token = &caps[0];
            if token == "%%" {
                return "%".to_string();
            }
            let Some(arg) = values.get(index) else {
                return token.to_string();
            };
            index += 1;
            match token {
                "%s" => to_js_string(arg),
                "%d" => number_to_string(to_number(arg)),
                _ => json_token(arg),
            }
        })
        .into_owned();

    for value in values.iter().skip(index) {
        out.push(' ');
        if value.is_object() {
            out.push_str(&inspect(value, InspectOptions::default()));
        } else {
            out.push_str(&to_js_string(value));
        }
    }
    out
}

fn json_token(value: &Value) -> String {
    match json_stringify(value) {
        Ok(Some(json)) => json,
        Ok(None) => "undefined".to_string(),
        Err(err) => {
            log::debug!(target: targets::FORMAT, "%j substitution degraded: {err}");
            "[Circular]".to_string()
        }
    }
}
