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

/// The `result` object of a computation envelope, or the value itself.
pub fn result_of(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

/// Flatten nested objects into dotted `(field, value)` rows.
///
/// `{"breakdown": {"pref": "80000"}}` becomes `("breakdown.pref", "80000")`.
/// Arrays of objects (per-tier results) are left to the caller; arrays of
/// scalars are joined with commas.
pub fn flatten_fields(map: &Map<String, Value>) -> Vec<(String, String)> {
    let mut rows = Vec::new();
    flatten_into("", map, &mut rows);
    rows
}

fn flatten_into(prefix: &str, map: &Map<String, Value>, rows: &mut Vec<(String, String)>) {
    for (key, val) in map {
        let field = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(inner) => flatten_into(&field, inner, rows),
            Value::Array(items) if items.iter().any(Value::is_object) => {}
            _ => rows.push((field, scalar_text(val))),
        }
    }
}

/// Arrays of objects found anywhere in the map, keyed by dotted path.
pub fn nested_tables(map: &Map<String, Value>) -> Vec<(String, &Vec<Value>)> {
    let mut tables = Vec::new();
    collect_tables("", map, &mut tables);
    tables
}

fn collect_tables<'a>(
    prefix: &str,
    map: &'a Map<String, Value>,
    tables: &mut Vec<(String, &'a Vec<Value>)>,
) {
    for (key, val) in map {
        let field = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(inner) => collect_tables(&field, inner, tables),
            Value::Array(items) if items.iter().any(Value::is_object) => {
                tables.push((field, items))
            }
            _ => {}
        }
    }
}

pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => arr.iter().map(scalar_text).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
