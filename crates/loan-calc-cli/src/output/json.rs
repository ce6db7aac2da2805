use loan_calc_core::LoanCalcResult;
use serde_json::Value;

/// Pretty-print the full computation envelope.
pub fn render_json(value: &Value) -> LoanCalcResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use loan_calc_core::{run, LoanInput, PaymentType};
    use rust_decimal_macros::dec;

    #[test]
    fn test_envelope_shape() {
        let out = run(&LoanInput {
            payment_type: Some(PaymentType::Diff),
            principal: Some(1000),
            periods: Some(2),
            interest: Some(dec!(12)),
            ..LoanInput::default()
        })
        .unwrap();
        let value = serde_json::to_value(&out).unwrap();
        assert_eq!(value["result"]["kind"], "schedule");
        assert_eq!(value["result"]["payments"][0]["month"], 1);
        assert_eq!(value["result"]["payments"][0]["payment"], 510);
        assert!(value["methodology"].as_str().unwrap().starts_with("Differentiated"));
        assert!(value["warnings"].as_array().unwrap().is_empty());
        assert_eq!(value["metadata"]["version"], env!("CARGO_PKG_VERSION"));

        let rendered = render_json(&value).unwrap();
        assert!(rendered.starts_with('{'));
        assert!(rendered.contains("\"kind\": \"schedule\""));
    }
}
