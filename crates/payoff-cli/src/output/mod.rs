pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// A serialised payoff table flattened into a header and string cells, in
/// column order: expiration price, breakdown columns, net payoff.
pub struct PayoffGrid {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub net_payoffs: Vec<String>,
}

/// Recognise a serialised `PayoffTable` (an object with `columns` and `rows`).
pub fn payoff_grid(value: &Value) -> Option<PayoffGrid> {
    let columns = value.get("columns")?.as_array()?;
    let rows = value.get("rows")?.as_array()?;

    let mut headers = vec!["Expiration Price".to_string()];
    headers.extend(columns.iter().map(scalar_text));
    headers.push("Net Payoff".to_string());

    let mut cells = Vec::with_capacity(rows.len());
    let mut net_payoffs = Vec::with_capacity(rows.len());
    for row in rows {
        let net = row.get("net_payoff").map(scalar_text).unwrap_or_default();
        let mut record = vec![row
            .get("expiration_price")
            .map(scalar_text)
            .unwrap_or_default()];
        if let Some(Value::Array(values)) = row.get("values") {
            record.extend(values.iter().map(scalar_text));
        }
        record.push(net.clone());
        cells.push(record);
        net_payoffs.push(net);
    }

    Some(PayoffGrid {
        headers,
        rows: cells,
        net_payoffs,
    })
}

/// Render a scalar JSON value without quotes.
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
