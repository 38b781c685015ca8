use serde_json::Value;

use super::payoff_grid;

/// Print just the key answer value from the output.
///
/// Heuristic: a payoff table prints one `price net_payoff` line per row;
/// otherwise look for well-known result fields in order of priority, then
/// fall back to the first field in the result object.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Some(grid) = payoff_grid(result_obj) {
        for row in &grid.rows {
            if let (Some(price), Some(net)) = (row.first(), row.last()) {
                println!("{} {}", price, net);
            }
        }
        return;
    }

    // Priority list of key output fields
    let priority_keys = ["break_even", "message", "severity", "net_premium", "id"];

    if let Value::Object(map) = result_obj {
        // Try priority keys first (skip null and empty values)
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() && val.as_str() != Some("") {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    if let Value::Array(items) = result_obj {
        for item in items {
            println!("{}", format_minimal(item.get("id").unwrap_or(item)));
        }
        return;
    }

    println!("{}", format_minimal(result_obj));
}

/// Scalars print bare; nested values print their leaf scalars, comma separated.
fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(items) => items
            .iter()
            .map(format_minimal)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(map) => map
            .values()
            .map(format_minimal)
            .collect::<Vec<_>>()
            .join(", "),
    }
}
