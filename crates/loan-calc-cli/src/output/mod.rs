pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;
pub mod text;

use crate::OutputFormat;
use loan_calc_core::{ComputationOutput, LoanCalcResult, LoanResult};

/// Render the output in the requested format. The returned text ends with
/// a newline.
pub fn render_output(
    format: &OutputFormat,
    output: &ComputationOutput<LoanResult>,
) -> LoanCalcResult<String> {
    let rendered = match format {
        OutputFormat::Text => text::render_text(&output.result),
        OutputFormat::Json => json::render_json(&serde_json::to_value(output)?)?,
        OutputFormat::Table => table::render_table(&serde_json::to_value(output)?),
        OutputFormat::Csv => return csv_out::render_csv(&serde_json::to_value(output)?),
        OutputFormat::Minimal => minimal::minimal_lines(&serde_json::to_value(output)?).join("\n"),
    };
    Ok(rendered + "\n")
}
