//! End-to-end checks of the public formatting surface.

use scriptlog_core::{
    CustomInspectable, Depth, InspectContext, InspectOptions, Inspected, ObjectRef, Value, format,
    inspect, is_boolean, is_function, is_null, is_object, is_string, is_undefined, values,
};

// ============================================================================
// format
// ============================================================================

#[test]
fn templates_without_tokens_append_every_argument() {
    let nested = Value::object([("k", Value::array([1, 2]))]);
    let out = format(&values!["status:", "ok", 200, Value::Null, nested]);
    assert_eq!(out, "status: ok 200 null { k: [ 1, 2 ] }");
}

#[test]
fn documented_examples() {
    assert_eq!(format(&values!["%s-%d", "a", 3]), "a-3");
    assert_eq!(format(&values!["%j", Value::object([("a", 1)])]), r#"{"a":1}"#);
    assert_eq!(format(&values!["%%"]), "%");
    assert_eq!(format(&values!["%s %s", "x"]), "x %s");
}

#[test]
fn json_token_degrades_on_self_reference() {
    let list = scriptlog_core::ArrayRef::new(vec![Value::from(1)]);
    list.push(list.clone());
    assert_eq!(format(&values!["value=%j", list.clone()]), "value=[Circular]");
    // inspect still renders the same structure
    assert_eq!(inspect(&Value::from(list), InspectOptions::default()), "[ 1, [Circular] ]");
}

#[test]
fn mixed_tokens_and_leftovers() {
    let out = format(&values!["%s has %d items (%j)", "cart", "3", Value::array(["a"]), "extra"]);
    assert_eq!(out, r#"cart has 3 items (["a"]) extra"#);
}

// ============================================================================
// inspect
// ============================================================================

fn nested(levels: usize) -> Value {
    let mut value = Value::from("leaf");
    for i in 0..levels {
        value = Value::object([(format!("level{i}"), value)]);
    }
    value
}

#[test]
fn depth_zero_does_not_expand_children() {
    let out = inspect(&nested(3), InspectOptions::new().depth(Depth::Limited(0)));
    assert_eq!(out, "{ level2: [Object] }");
}

#[test]
fn increasing_depth_never_shortens_output() {
    let value = nested(6);
    let lengths: Vec<usize> = (0..8)
        .map(|d| inspect(&value, InspectOptions::new().depth(Depth::Limited(d))).len())
        .collect();
    assert!(lengths.windows(2).all(|w| w[0] <= w[1]), "{lengths:?}");
}

#[test]
fn options_object_overrides_defaults() {
    let options = Value::object([("depth", Value::Null), ("colors", Value::from(false))]);
    let out = inspect(&nested(5), &options);
    assert!(out.contains("'leaf'"));
    assert!(!out.contains("[Object]"));
}

#[test]
fn colors_wrap_terminal_tokens() {
    let value = Value::array([Value::from("s"), Value::from(1), Value::Undefined]);
    let out = inspect(&value, InspectOptions::new().colors(true));
    assert_eq!(
        out,
        "[ \u{1b}[32m's'\u{1b}[39m, \u{1b}[33m1\u{1b}[39m, \u{1b}[90mundefined\u{1b}[39m ]"
    );
}

struct Temperature(f64);

impl CustomInspectable for Temperature {
    fn inspect(&self, _recurse_times: Option<isize>, ctx: &mut InspectContext) -> Inspected {
        let degrees = ctx.format_value(&Value::from(self.0), None);
        Inspected::Text(format!("{degrees}°C"))
    }

    fn to_display(&self) -> String {
        format!("{}°C", self.0)
    }

    fn to_json(&self) -> Option<serde_json::Value> {
        Some(serde_json::json!({ "celsius": self.0 }))
    }
}

#[test]
fn custom_values_describe_themselves() {
    let reading = Value::object([("temp", Value::custom(Temperature(21.5)))]);
    assert_eq!(inspect(&reading, InspectOptions::default()), "{ temp: 21.5°C }");
    assert_eq!(
        format(&values!["%s / %j", Value::custom(Temperature(3.0)), Value::custom(Temperature(3.0))]),
        r#"3°C / {"celsius":3}"#
    );
}

#[test]
fn custom_json_uses_script_number_notation() {
    let out = format(&values!["%j", Value::custom(Temperature(1e21))]);
    assert_eq!(out, r#"{"celsius":1e+21}"#);
}

#[test]
fn predicates() {
    assert!(is_undefined(&Value::Undefined));
    assert!(is_null(&Value::Null));
    assert!(is_string(&Value::from("")));
    assert!(is_boolean(&Value::from(false)));
    assert!(is_function(&Value::function("f")));
    assert!(is_object(&Value::from(ObjectRef::new())));
    assert!(!is_object(&Value::Null));
}
