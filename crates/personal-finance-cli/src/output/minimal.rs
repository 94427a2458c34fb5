use serde_json::Value;

use super::{flatten, result_of, scalar};

/// Headline figures, most specific first.
const PRIORITY_KEYS: [&str; 8] = [
    "risk_score",
    "maximum_mortgage",
    "income_tax",
    "national_insurance",
    "regional_tax",
    "qualifies_for_mortgage",
    "valid",
    "formatted",
];

/// Print just the headline value, falling back to the first flattened field.
pub fn print_minimal(value: &Value) {
    println!("{}", headline(result_of(value)));
}

fn headline(result: &Value) -> String {
    if let Value::Object(map) = result {
        for key in PRIORITY_KEYS {
            match map.get(key) {
                Some(Value::Object(_)) | Some(Value::Null) | None => {}
                Some(val) => return scalar(val),
            }
        }
    }

    match flatten(result).into_iter().next() {
        Some((key, val)) if !key.is_empty() => format!("{key}: {val}"),
        Some((_, val)) => val,
        None => String::new(),
    }
}
