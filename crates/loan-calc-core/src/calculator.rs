use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::annuity::payment::{calculate_annuity_payment, AnnuityPaymentOutput};
use crate::annuity::principal::{calculate_principal, PrincipalOutput};
use crate::annuity::term::{calculate_term, TermOutput};
use crate::differentiated::{calculate_differentiated, DifferentiatedOutput};
use crate::request::{validate, LoanInput, LoanRequest};
use crate::types::ComputationOutput;
use crate::LoanCalcResult;

/// Outcome of whichever calculation the request selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LoanResult {
    Term(TermOutput),
    Payment(AnnuityPaymentOutput),
    Principal(PrincipalOutput),
    Schedule(DifferentiatedOutput),
}

impl LoanResult {
    pub fn overpayment(&self) -> i64 {
        match self {
            LoanResult::Term(t) => t.overpayment,
            LoanResult::Payment(p) => p.overpayment,
            LoanResult::Principal(p) => p.overpayment,
            LoanResult::Schedule(s) => s.overpayment,
        }
    }
}

/// Run the calculator for an already validated request.
pub fn calculate(request: &LoanRequest) -> LoanCalcResult<ComputationOutput<LoanResult>> {
    debug!(mode = %request.mode(), "calculating");
    let output = match request {
        LoanRequest::Differentiated(input) => {
            calculate_differentiated(input)?.map_result(LoanResult::Schedule)
        }
        LoanRequest::AnnuityPayment(input) => {
            calculate_annuity_payment(input)?.map_result(LoanResult::Payment)
        }
        LoanRequest::AnnuityPrincipal(input) => {
            calculate_principal(input)?.map_result(LoanResult::Principal)
        }
        LoanRequest::AnnuityTerm(input) => calculate_term(input)?.map_result(LoanResult::Term),
    };
    Ok(output)
}

/// Validate raw parameters and run the selected calculation.
pub fn run(input: &LoanInput) -> LoanCalcResult<ComputationOutput<LoanResult>> {
    let request = validate(input)?;
    calculate(&request)
}
