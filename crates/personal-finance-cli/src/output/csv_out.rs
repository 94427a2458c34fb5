use serde_json::Value;
use std::io;

use super::{flatten, result_of, scalar};

/// Write the result as CSV to stdout: one row per array element when the
/// result is a list, otherwise `field,value` pairs over the flattened result.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let written = match result_of(value) {
        Value::Array(rows) => write_rows(&mut wtr, rows),
        result => write_fields(&mut wtr, result),
    };

    if let Err(e) = written.and_then(|_| wtr.flush().map_err(csv::Error::from)) {
        eprintln!("CSV write error: {e}");
    }
}

fn write_fields<W: io::Write>(wtr: &mut csv::Writer<W>, result: &Value) -> csv::Result<()> {
    wtr.write_record(["field", "value"])?;
    for (key, val) in flatten(result) {
        wtr.write_record([key, val])?;
    }
    Ok(())
}

fn write_rows<W: io::Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) -> csv::Result<()> {
    let Some(Value::Object(first)) = rows.first() else {
        for row in rows {
            wtr.write_record([scalar(row)])?;
        }
        return Ok(());
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    wtr.write_record(&headers)?;
    for row in rows {
        let cells: Vec<String> = headers
            .iter()
            .map(|h| row.get(*h).map(scalar).unwrap_or_default())
            .collect();
        wtr.write_record(&cells)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: &Value) -> String {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        match result_of(value) {
            Value::Array(rows) => write_rows(&mut wtr, rows).unwrap(),
            result => write_fields(&mut wtr, result).unwrap(),
        }
        String::from_utf8(wtr.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_fields_from_envelope() {
        let out = render(&json!({"result": {"risk_score": 9, "raw_score": 9}}));
        assert_eq!(out, "field,value\nraw_score,9\nrisk_score,9\n");
    }

    #[test]
    fn test_rows_from_array() {
        let out = render(&json!([{"factor": "age", "bands": 7}]));
        assert_eq!(out, "bands,factor\n7,age\n");
    }
}
