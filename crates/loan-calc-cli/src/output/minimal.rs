use serde_json::Value;

/// The figure that was solved for, in priority order.
const PRIORITY_KEYS: [&str; 4] = ["monthly_payment", "principal", "total_months", "overpayment"];

/// Just the key answer from the output. Schedules yield one payment per line; other results yield the first
/// non-null priority field, falling back to the first field present.
pub fn minimal_lines(value: &Value) -> Vec<String> {
    let result = value.get("result").unwrap_or(value);

    let Value::Object(map) = result else {
        return vec![format_minimal(result)];
    };

    if let Some(Value::Array(rows)) = map.get("payments") {
        return rows
            .iter()
            .filter_map(|row| row.get("payment"))
            .map(format_minimal)
            .collect();
    }

    for key in PRIORITY_KEYS {
        if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
            return vec![format_minimal(val)];
        }
    }

    map.iter()
        .next()
        .map(|(key, val)| vec![format!("{}: {}", key, format_minimal(val))])
        .unwrap_or_default()
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
