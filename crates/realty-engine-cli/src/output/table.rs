use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{flatten_fields, nested_tables, scalar_text};

/// Format an envelope as tables: one for the flattened result fields, one per
/// nested list (waterfall tiers, applied defaults), then warnings and the
/// methodology line.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => print_result(result, map),
            _ => print_fields(map),
        },
        Value::Array(arr) => print_rows(arr),
        _ => println!("{}", value),
    }
}

fn print_result(result: &Map<String, Value>, envelope: &Map<String, Value>) {
    print_fields(result);

    for (name, rows) in nested_tables(result) {
        println!("\n{}:", name);
        print_rows(rows);
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_fields(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (field, text) in flatten_fields(map) {
        builder.push_record([field, text]);
    }
    println!("{}", Table::from(builder));
}

fn print_rows(arr: &[Value]) {
    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            println!("{}", scalar_text(item));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(headers.iter().map(String::as_str));
    for item in arr.iter().filter_map(Value::as_object) {
        builder.push_record(
            headers
                .iter()
                .map(|h| item.get(h).map(scalar_text).unwrap_or_default()),
        );
    }
    println!("{}", Table::from(builder));
}
