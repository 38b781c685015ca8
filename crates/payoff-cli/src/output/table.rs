use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{payoff_grid, scalar_text, PayoffGrid};

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            // Check if "result" key holds the primary data
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_flat_object(value);
            }
        }
        Value::Array(arr) => {
            print_array_table(arr);
        }
        _ => {
            println!("{}", value);
        }
    }
}

fn print_result_table(result: &Value, envelope: &serde_json::Map<String, Value>) {
    if let Some(grid) = payoff_grid(result) {
        print_grid(&grid);
    } else if let Value::Object(res_map) = result {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in res_map {
            if key == "payoff_table" {
                continue;
            }
            let text = if val.is_null() && key.starts_with("max_") {
                "unlimited".to_string()
            } else {
                format_value(val)
            };
            builder.push_record([key.as_str(), &text]);
        }
        println!("{}", Table::from(builder));

        if let Some(grid) = res_map.get("payoff_table").and_then(payoff_grid) {
            println!();
            print_grid(&grid);
        }
    } else {
        print_flat_object(&Value::Object(envelope.clone()));
    }

    // Print warnings if any
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

/// Payoff rows with a trailing outcome column.
fn print_grid(grid: &PayoffGrid) {
    let mut builder = Builder::default();
    let mut headers = grid.headers.clone();
    headers.push("Outcome".to_string());
    builder.push_record(headers);

    for (row, net) in grid.rows.iter().zip(&grid.net_payoffs) {
        let mut record = row.clone();
        record.push(outcome_label(net).to_string());
        builder.push_record(record);
    }
    println!("{}", Table::from(builder));
}

fn outcome_label(net_payoff: &str) -> &'static str {
    match net_payoff.parse::<rust_decimal::Decimal>() {
        Ok(n) if n.is_sign_positive() && !n.is_zero() => "profit",
        Ok(n) if n.is_zero() => "break-even",
        Ok(_) => "loss",
        Err(_) => "",
    }
}

fn print_flat_object(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        println!("{}", Table::from(builder));
    }
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    // Collect all keys from first object for headers
    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "n/a".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(map) => {
            let items: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", k, format_value(v)))
                .collect();
            items.join("; ")
        }
        _ => scalar_text(value),
    }
}
