pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The `result` of a computation envelope, or the value itself.
pub fn result_of(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

/// Flatten nested objects and arrays into `(dotted.key, scalar)` rows,
/// e.g. `income_tax.bands.0.charge`.
pub fn flatten(value: &Value) -> Vec<(String, String)> {
    let mut rows = Vec::new();
    match value {
        Value::Object(map) => flatten_object("", map, &mut rows),
        other => rows.push((String::new(), scalar(other))),
    }
    rows
}

fn flatten_object(prefix: &str, map: &Map<String, Value>, rows: &mut Vec<(String, String)>) {
    for (key, val) in map {
        flatten_into(&join(prefix, key), val, rows);
    }
}

fn flatten_into(key: &str, value: &Value, rows: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => flatten_object(key, map, rows),
        Value::Array(items) if items.iter().any(|v| v.is_object() || v.is_array()) => {
            for (i, item) in items.iter().enumerate() {
                flatten_into(&join(key, &i.to_string()), item, rows);
            }
        }
        other => rows.push((key.to_string(), scalar(other))),
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Render a leaf value. Scalar arrays are comma-joined.
pub fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(items) => items.iter().map(scalar).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_nested_breakdown() {
        let value = json!({
            "income_tax": "17432.00",
            "bands": [{"label": "basic", "charge": "7540.00"}],
            "warnings": ["a", "b"],
        });
        let rows = flatten(&value);
        assert!(rows.contains(&("income_tax".into(), "17432.00".into())));
        assert!(rows.contains(&("bands.0.label".into(), "basic".into())));
        assert!(rows.contains(&("bands.0.charge".into(), "7540.00".into())));
        assert!(rows.contains(&("warnings".into(), "a, b".into())));
    }

    #[test]
    fn test_result_of_envelope() {
        let value = json!({"result": {"risk_score": 9}, "warnings": []});
        assert_eq!(result_of(&value), &json!({"risk_score": 9}));
        let bare = json!({"formatted": "1,000.00"});
        assert_eq!(result_of(&bare), &bare);
    }
}
