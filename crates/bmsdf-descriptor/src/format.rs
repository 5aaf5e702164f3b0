//! Descriptor text output
//!
//! The descriptor is lowered to a `serde_json::Value` once. A single
//! recursive pass tidies every floating point number in that tree, then
//! either flavour is written from the same tree.

use std::fmt::Write;

use serde_json::{Map, Value};

use crate::{DescriptorError, FontDescriptor, OutputType, Result};

/// Render the descriptor in the requested flavour
pub fn render(
    descriptor: &FontDescriptor,
    output_type: OutputType,
    round_decimal: Option<u32>,
) -> Result<String> {
    let mut value = serde_json::to_value(descriptor)?;
    normalize_numbers(&mut value, round_decimal);

    match output_type {
        OutputType::Json => Ok(serde_json::to_string_pretty(&value)?),
        OutputType::Xml => to_xml(&value),
    }
}

/// Round every floating point number in the tree.
///
/// With `round_decimal` unset, numbers are reduced to the shortest text
/// that reads back as the same single precision value. Integral results
/// become integers.
pub fn normalize_numbers(value: &mut Value, round_decimal: Option<u32>) {
    let replacement = match value {
        Value::Number(n) if n.is_f64() => n.as_f64().map(|v| tidy(v, round_decimal)),
        Value::Array(items) => {
            for item in items {
                normalize_numbers(item, round_decimal);
            }
            None
        }
        Value::Object(map) => {
            for item in map.values_mut() {
                normalize_numbers(item, round_decimal);
            }
            None
        }
        _ => None,
    };

    if let Some(replacement) = replacement {
        *value = replacement;
    }
}

fn tidy(v: f64, round_decimal: Option<u32>) -> Value {
    let v = match round_decimal {
        Some(d) => {
            let factor = 10f64.powi(d as i32);
            (v * factor).round() / factor
        }
        None => (v as f32).to_string().parse::<f64>().unwrap_or(v),
    };

    if v.fract() == 0.0 && v.abs() < 1e15 {
        Value::from(v as i64)
    } else {
        serde_json::Number::from_f64(v).map_or(Value::Null, Value::Number)
    }
}

/// BMFont XML flavour
pub fn to_xml(value: &Value) -> Result<String> {
    let root = value
        .as_object()
        .ok_or(DescriptorError::Malformed("descriptor"))?;
    let mut out = String::from("<?xml version=\"1.0\"?>\n<font>\n");

    single(&mut out, "info", object(root, "info")?);
    single(&mut out, "common", object(root, "common")?);

    out.push_str("  <pages>\n");
    for (id, file) in array(root, "pages")?.iter().enumerate() {
        let _ = writeln!(out, "    <page id=\"{}\" file=\"{}\"/>", id, attr_value(file));
    }
    out.push_str("  </pages>\n");

    single(&mut out, "distanceField", object(root, "distanceField")?);
    list(&mut out, "chars", "char", array(root, "chars")?)?;
    list(&mut out, "kernings", "kerning", array(root, "kernings")?)?;

    out.push_str("</font>\n");
    Ok(out)
}

fn object<'a>(root: &'a Map<String, Value>, key: &'static str) -> Result<&'a Map<String, Value>> {
    root.get(key)
        .and_then(Value::as_object)
        .ok_or(DescriptorError::Malformed(key))
}

fn array<'a>(root: &'a Map<String, Value>, key: &'static str) -> Result<&'a Vec<Value>> {
    root.get(key)
        .and_then(Value::as_array)
        .ok_or(DescriptorError::Malformed(key))
}

fn single(out: &mut String, tag: &str, attrs: &Map<String, Value>) {
    let _ = writeln!(out, "  <{}{}/>", tag, attributes(attrs));
}

fn list(out: &mut String, tag: &'static str, item_tag: &str, items: &[Value]) -> Result<()> {
    let _ = writeln!(out, "  <{} count=\"{}\">", tag, items.len());
    for item in items {
        let attrs = item.as_object().ok_or(DescriptorError::Malformed(tag))?;
        let _ = writeln!(out, "    <{}{}/>", item_tag, attributes(attrs));
    }
    let _ = writeln!(out, "  </{}>", tag);
    Ok(())
}

fn attributes(attrs: &Map<String, Value>) -> String {
    let mut s = String::new();
    for (key, value) in attrs {
        let _ = write!(s, " {}=\"{}\"", key, attr_value(value));
    }
    s
}

fn attr_value(value: &Value) -> String {
    match value {
        Value::String(s) => escape(s),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => (if *b { "1" } else { "0" }).to_string(),
        // Character lists are written as one string, number lists comma separated
        Value::Array(items) if items.iter().all(Value::is_string) => {
            items.iter().map(attr_value).collect()
        }
        Value::Array(items) => items.iter().map(attr_value).collect::<Vec<_>>().join(","),
        Value::Null | Value::Object(_) => String::new(),
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_recursive() {
        let mut value = json!({
            "a": 1.23456,
            "b": [0.5f32 as f64 * 3.0, {"c": -2.0049}],
            "d": 7,
            "e": "1.5",
        });
        normalize_numbers(&mut value, Some(2));
        assert_eq!(value, json!({"a": 1.23, "b": [1.5, {"c": -2}], "d": 7, "e": "1.5"}));
    }

    #[test]
    fn test_normalize_single_precision_noise() {
        let mut value = json!({ "scale": 0.042f32 as f64 });
        normalize_numbers(&mut value, None);
        assert_eq!(value.to_string(), r#"{"scale":0.042}"#);
    }

    #[test]
    fn test_integral_floats_become_integers() {
        let mut value = json!([12.0, -0.0]);
        normalize_numbers(&mut value, None);
        assert_eq!(value.to_string(), "[12,0]");
    }

    #[test]
    fn test_attr_values() {
        assert_eq!(attr_value(&json!("a\"<&")), "a&quot;&lt;&amp;");
        assert_eq!(attr_value(&json!([2, 2, 2, 2])), "2,2,2,2");
        assert_eq!(attr_value(&json!(["A", "B", "&"])), "AB&amp;");
    }

    #[test]
    fn test_xml_rejects_non_object() {
        assert!(matches!(to_xml(&json!([])), Err(DescriptorError::Malformed("descriptor"))));
    }
}
