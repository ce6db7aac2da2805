use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

/// Format output as tables using the tabled crate: schedule rows (if any), then the scalar result fields, then warnings and
/// methodology from the envelope.
pub fn render_table(value: &Value) -> String {
    let Some(envelope) = value.as_object() else {
        return value.to_string();
    };
    let Some(Value::Object(result)) = envelope.get("result") else {
        return field_table(envelope);
    };

    let mut sections: Vec<String> = Vec::new();
    if let Some(Value::Array(rows)) = result.get("payments") {
        sections.push(rows_table(rows));
    }

    let scalars: Map<String, Value> = result
        .iter()
        .filter(|(_, v)| !v.is_array() && !v.is_object())
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    sections.push(field_table(&scalars));

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            let mut block = String::from("Warnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                block.push_str("\n  - ");
                block.push_str(w);
            }
            sections.push(block);
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        sections.push(format!("Methodology: {}", meth));
    }

    sections.join("\n\n")
}

fn field_table(map: &Map<String, Value>) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &format_value(val)]);
    }
    Table::from(builder).to_string()
}

fn rows_table(rows: &[Value]) -> String {
    let Some(Value::Object(first)) = rows.first() else {
        return "(empty)".to_string();
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);
    for row in rows.iter().filter_map(Value::as_object) {
        let cells: Vec<String> = headers
            .iter()
            .map(|h| row.get(h).map(format_value).unwrap_or_default())
            .collect();
        builder.push_record(cells);
    }
    Table::from(builder).to_string()
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payment_table() {
        let value = json!({
            "result": {"kind": "payment", "monthly_payment": 21248, "overpayment": 274880},
            "methodology": "Annuity payment",
            "warnings": [],
        });
        let table = render_table(&value);
        assert!(table.contains("monthly_payment"));
        assert!(table.contains("21248"));
        assert!(table.contains("Methodology: Annuity payment"));
        assert!(!table.contains("Warnings:"));
    }

    #[test]
    fn test_schedule_table_lists_rows() {
        let value = json!({
            "result": {
                "kind": "schedule",
                "payments": [
                    {"month": 1, "payment": 510},
                    {"month": 2, "payment": 505},
                ],
                "overpayment": 15,
            },
            "warnings": ["check me"],
        });
        let table = render_table(&value);
        assert!(table.contains("month"));
        assert!(table.contains("510"));
        assert!(table.contains("505"));
        assert!(table.contains("overpayment"));
        assert!(table.contains("  - check me"));
    }
}
