use loan_calc_core::{LoanCalcError, LoanCalcResult};
use serde_json::Value;
use std::io;

/// Render output as CSV. Schedule results become one row per month;
/// everything else is a two-column field/value listing of the result.
pub fn render_csv(value: &Value) -> LoanCalcResult<String> {
    let mut buf = Vec::new();
    write_csv(value, &mut buf)?;
    String::from_utf8(buf).map_err(|e| LoanCalcError::SerializationError(e.to_string()))
}

pub fn write_csv<W: io::Write>(value: &Value, writer: W) -> LoanCalcResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    let result = value.get("result").unwrap_or(value);

    match result {
        Value::Object(map) => {
            if let Some(Value::Array(rows)) = map.get("payments") {
                write_rows(&mut wtr, rows)?;
            } else {
                wtr.write_record(["field", "value"]).map_err(csv_error)?;
                for (key, val) in map {
                    wtr.write_record([key.as_str(), &format_csv_value(val)])
                        .map_err(csv_error)?;
                }
            }
        }
        Value::Array(rows) => write_rows(&mut wtr, rows)?,
        _ => wtr.write_record([&format_csv_value(result)]).map_err(csv_error)?,
    }

    wtr.flush()
        .map_err(|e| LoanCalcError::SerializationError(e.to_string()))
}

fn csv_error(e: csv::Error) -> LoanCalcError {
    LoanCalcError::SerializationError(e.to_string())
}

fn write_rows<W: io::Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) -> LoanCalcResult<()> {
    let Some(Value::Object(first)) = rows.first() else {
        return Ok(());
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    wtr.write_record(&headers).map_err(csv_error)?;
    for row in rows.iter().filter_map(Value::as_object) {
        let cells: Vec<String> = headers
            .iter()
            .map(|h| row.get(*h).map(format_csv_value).unwrap_or_default())
            .collect();
        wtr.write_record(&cells).map_err(csv_error)?;
    }
    Ok(())
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
