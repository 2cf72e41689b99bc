use serde_json::Value;
use std::io;

use super::{flatten_fields, result_of, scalar_text};

/// Write the result as two-column `field,value` CSV to stdout.
///
/// Nested objects are flattened to dotted field names; waterfall tiers are
/// emitted as `tiers.<n>.<column>` rows so the output stays two columns wide.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    for record in csv_records(value) {
        let _ = wtr.write_record(&record);
    }
    let _ = wtr.flush();
}

fn csv_records(value: &Value) -> Vec<[String; 2]> {
    let mut records = vec![["field".to_string(), "value".to_string()]];

    match result_of(value) {
        Value::Object(result) => {
            for (field, text) in flatten_fields(result) {
                records.push([field, text]);
            }
            for (name, rows) in super::nested_tables(result) {
                for (i, row) in rows.iter().enumerate() {
                    if let Value::Object(cols) = row {
                        for (col, val) in cols {
                            records.push([format!("{name}.{i}.{col}"), scalar_text(val)]);
                        }
                    }
                }
            }
        }
        other => records.push(["value".to_string(), scalar_text(other)]),
    }

    records
}
