use serde_json::{Map, Value};

use super::{result_of, scalar_text};

/// Headline fields, in priority order. Dotted keys reach into nested results.
const PRIORITY_KEYS: &[&str] = &[
    "lp_total",
    "cap_rate",
    "lp_equity",
    "distribution.lp_total",
    "total_equity_required",
    "dscr",
];

/// Print just the headline value of a result.
///
/// Looks for well-known fields first, then falls back to the first field in
/// the result object.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_text(value));
}

fn minimal_text(value: &Value) -> String {
    let result = result_of(value);

    if let Value::Object(map) = result {
        for key in PRIORITY_KEYS {
            if let Some(val) = lookup(map, key) {
                if !val.is_null() {
                    return scalar_text(val);
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, scalar_text(val));
        }
    }

    scalar_text(result)
}

fn lookup<'a>(map: &'a Map<String, Value>, dotted: &str) -> Option<&'a Value> {
    let mut parts = dotted.split('.');
    let mut current = map.get(parts.next()?)?;
    for part in parts {
        current = current.as_object()?.get(part)?;
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_distribution_headline() {
        let value = json!({"result": {"gp_total": "34000", "lp_total": "216000"}});
        assert_eq!(minimal_text(&value), "216000");
    }

    #[test]
    fn test_deal_headline_reaches_nested_distribution() {
        let value = json!({"result": {
            "underwriting": {"cap_rate": "8.00"},
            "distribution": {"lp_total": "45040"}
        }});
        assert_eq!(minimal_text(&value), "45040");
    }

    #[test]
    fn test_fallback_to_first_field() {
        let value = json!({"result": {"total_basis": "1050000"}});
        assert_eq!(minimal_text(&value), "total_basis: 1050000");
    }
}
