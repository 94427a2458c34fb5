use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{flatten, result_of, scalar};

/// Field/value table over the flattened result, followed by the envelope's
/// warnings and methodology.
pub fn print_table(value: &Value) {
    match result_of(value) {
        Value::Array(rows) => print_array_table(rows),
        result => print_field_table(result),
    }

    if let Some(envelope) = value.as_object() {
        if let Some(Value::Array(warnings)) = envelope.get("warnings") {
            if !warnings.is_empty() {
                println!("\nWarnings:");
                for w in warnings {
                    println!("  - {}", scalar(w));
                }
            }
        }
        if let Some(Value::String(meth)) = envelope.get("methodology") {
            println!("\nMethodology: {meth}");
        }
    }
}

fn print_field_table(result: &Value) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in flatten(result) {
        builder.push_record([key, val]);
    }
    println!("{}", Table::from(builder));
}

fn print_array_table(rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        for row in rows {
            println!("{}", scalar(row));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for row in rows {
        let cells: Vec<String> = headers
            .iter()
            .map(|h| row.get(h.as_str()).map(scalar).unwrap_or_default())
            .collect();
        builder.push_record(cells);
    }
    println!("{}", Table::from(builder));
}
