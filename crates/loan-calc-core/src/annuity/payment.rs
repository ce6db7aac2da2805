use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use super::{checked_product, require_positive};
use crate::time_value::{annuity_factor, monthly_rate};
use crate::types::*;
use crate::LoanCalcResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnuityPaymentInput {
    pub principal: Money,
    pub periods: u32,
    /// Annual interest in percent
    pub annual_interest: Rate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnuityPaymentOutput {
    /// Fixed monthly payment, rounded up to the next whole unit
    pub monthly_payment: i64,
    /// Formula value before rounding, to 2 dp
    pub unrounded_payment: Money,
    pub total_paid: i64,
    pub overpayment: i64,
}

/// Fixed monthly payment that repays `principal` over `periods` months.
///
/// The payment is rounded up, so the lender never collects less than the
/// formula amount.
pub fn calculate_annuity_payment(
    input: &AnnuityPaymentInput,
) -> LoanCalcResult<ComputationOutput<AnnuityPaymentOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    require_positive(input.principal, "principal")?;
    require_positive(input.annual_interest, "interest")?;

    let rate = monthly_rate(input.annual_interest);
    let factor = annuity_factor(rate, input.periods)?;
    let exact = checked_product(input.principal, factor, "annuity payment")?;
    let payment = exact.ceil();
    debug!(%rate, %exact, %payment, "annuity payment");

    let total_paid = checked_product(payment, Decimal::from(input.periods), "total paid")?;
    let overpayment = total_paid - input.principal;
    if overpayment < Decimal::ZERO {
        warnings.push("Total repaid is below the principal; overpayment is negative.".into());
    }

    let output = AnnuityPaymentOutput {
        monthly_payment: to_whole(payment, "monthly payment")?,
        unrounded_payment: exact.round_dp(2),
        total_paid: to_whole(total_paid, "total paid")?,
        overpayment: to_whole(overpayment, "overpayment")?,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Annuity payment: P * i(1+i)^n / ((1+i)^n - 1), rounded up",
        input,
        warnings,
        elapsed,
        output,
    ))
}
