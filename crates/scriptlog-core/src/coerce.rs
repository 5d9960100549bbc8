//! Scalar coercions shared by `format` and `inspect`.
//!
//! These follow the host-script conventions the templates were written for:
//! `String(x)` for `%s`, `Number(x)` for `%d`, and the shortest round-trip
//! number notation with an exponent outside `[1e-6, 1e21)`.

use std::collections::HashSet;

use crate::value::Value;

/// Render a number the way script hosts print it.
#[must_use]
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let abs = n.abs();
    if (1e-6..1e21).contains(&abs) {
        return format!("{n}");
    }

    let exponential = format!("{n:e}");
    match exponential.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => exponential,
    }
}

/// String coercion (`%s`, leftover primitives, `Display`).
#[must_use]
pub fn to_js_string(value: &Value) -> String {
    let mut seen = HashSet::new();
    to_js_string_inner(value, &mut seen)
}

fn to_js_string_inner(value: &Value, seen: &mut HashSet<usize>) -> String {
    match value {
        Value::Undefined => "undefined".to_string(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_to_string(*n),
        Value::String(s) => s.clone(),
        Value::Date(Some(date)) => date
            .format("%a %b %d %Y %H:%M:%S GMT+0000 (Coordinated Universal Time)")
            .to_string(),
        Value::Date(None) => "Invalid Date".to_string(),
        Value::RegExp(re) => re.to_string(),
        Value::Function(f) => format!(
            "function {}() {{ [native code] }}",
            f.name.as_deref().unwrap_or_default()
        ),
        Value::Error(e) => e.to_string(),
        Value::Array(array) => {
            // A cyclic join contributes an empty string for the repeated array.
            if !seen.insert(array.id()) {
                return String::new();
            }
            let joined = array
                .to_vec()
                .iter()
                .map(|item| match item {
                    Value::Undefined | Value::Null => String::new(),
                    other => to_js_string_inner(other, seen),
                })
                .collect::<Vec<_>>()
                .join(",");
            seen.remove(&array.id());
            joined
        }
        Value::Object(_) => "[object Object]".to_string(),
        Value::Custom(custom) => custom.to_display(),
    }
}

/// Numeric coercion (`%d`).
#[must_use]
pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Undefined => f64::NAN,
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => *n,
        Value::String(s) => string_to_number(s),
        Value::Date(Some(date)) => date.timestamp_millis() as f64,
        Value::Date(None) => f64::NAN,
        other => string_to_number(&to_js_string(other)),
    }
}

/// Parse numeric text: trimmed decimal, `0x`/`0o`/`0b` integers, `Infinity`.
/// Empty text is zero; anything else that is not a number is NaN.
#[must_use]
pub fn string_to_number(text: &str) -> f64 {
    let s = text.trim();
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match s.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &s[2..];
        // from_str_radix tolerates a sign; prefixed literals never carry one.
        if digits.starts_with(['+', '-']) {
            return f64::NAN;
        }
        return u128::from_str_radix(digits, radix).map_or(f64::NAN, |n| n as f64);
    }

    let decimal_chars = s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if !decimal_chars {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

/// Single-quote a string with JSON-style escapes.
#[must_use]
pub fn quote_string(s: &str) -> String {
    let json = serde_json::to_string(s).unwrap_or_else(|_| format!("\"{s}\""));
    let inner = &json[1..json.len() - 1];
    let escaped = inner.replace('\'', "\\'").replace("\\\"", "\"");
    format!("'{escaped}'")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_number_to_string() {
        assert_eq!(number_to_string(3.0), "3");
        assert_eq!(number_to_string(-2.5), "-2.5");
        assert_eq!(number_to_string(0.1), "0.1");
        assert_eq!(number_to_string(-0.0), "0");
        assert_eq!(number_to_string(f64::NAN), "NaN");
        assert_eq!(number_to_string(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(number_to_string(1e21), "1e+21");
        assert_eq!(number_to_string(1.5e-7), "1.5e-7");
        assert_eq!(number_to_string(1e20), "100000000000000000000");
    }

    #[test]
    fn test_string_coercion() {
        assert_eq!(to_js_string(&Value::Undefined), "undefined");
        assert_eq!(to_js_string(&Value::Null), "null");
        assert_eq!(to_js_string(&Value::from(true)), "true");
        assert_eq!(to_js_string(&Value::array([Value::from(1), Value::Null, Value::from("a")])), "1,,a");
        assert_eq!(to_js_string(&Value::object([("a", 1)])), "[object Object]");
        assert_eq!(to_js_string(&Value::regexp("a+", "gi")), "/a+/gi");
        assert_eq!(to_js_string(&Value::error("TypeError", "bad")), "TypeError: bad");
        assert_eq!(to_js_string(&Value::error("Error", "")), "Error");
        assert_eq!(to_js_string(&Value::function("go")), "function go() { [native code] }");
    }

    #[test]
    fn test_date_string() {
        let date = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(
            to_js_string(&Value::from(date)),
            "Tue Jan 02 2024 03:04:05 GMT+0000 (Coordinated Universal Time)"
        );
        assert_eq!(to_js_string(&Value::Date(None)), "Invalid Date");
    }

    #[test]
    fn test_cyclic_array_join() {
        let array = crate::ArrayRef::new(vec![Value::from(1)]);
        array.push(array.clone());
        assert_eq!(to_js_string(&Value::from(array)), "1,");
    }

    #[test]
    fn test_numeric_coercion() {
        assert!(to_number(&Value::Undefined).is_nan());
        assert_eq!(to_number(&Value::Null), 0.0);
        assert_eq!(to_number(&Value::from(true)), 1.0);
        assert_eq!(to_number(&Value::from(" 42 ")), 42.0);
        assert_eq!(to_number(&Value::from("")), 0.0);
        assert_eq!(to_number(&Value::from("0x1F")), 31.0);
        assert_eq!(to_number(&Value::from("1e3")), 1000.0);
        assert!(to_number(&Value::from("0x+1F")).is_nan());
        assert!(to_number(&Value::from("0b-1")).is_nan());
        assert!(to_number(&Value::from("0o")).is_nan());
        assert!(to_number(&Value::from("12px")).is_nan());
        assert!(to_number(&Value::from("inf")).is_nan());
        assert_eq!(to_number(&Value::array(Vec::<Value>::new())), 0.0);
        assert_eq!(to_number(&Value::array(["7"])), 7.0);
        assert!(to_number(&Value::array([1, 2])).is_nan());
        assert!(to_number(&Value::object([("a", 1)])).is_nan());
    }

    #[test]
    fn test_quote_string() {
        assert_eq!(quote_string("abc"), "'abc'");
        assert_eq!(quote_string("it's"), "'it\\'s'");
        assert_eq!(quote_string("say \"hi\""), "'say \"hi\"'");
        assert_eq!(quote_string("a\nb"), "'a\\nb'");
    }
}
