use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;
use tracing::debug;

use super::{checked_product, require_positive};
use crate::error::LoanCalcError;
use crate::time_value::monthly_rate;
use crate::types::*;
use crate::LoanCalcResult;

const MONTHS_PER_YEAR: i64 = 12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermInput {
    pub payment: Money,
    pub principal: Money,
    /// Annual interest in percent
    pub annual_interest: Rate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermOutput {
    pub total_months: i64,
    pub years: i64,
    pub months: i64,
    pub total_paid: i64,
    pub overpayment: i64,
}

impl TermOutput {
    pub fn term(&self) -> LoanTerm {
        LoanTerm {
            years: self.years,
            months: self.months,
        }
    }
}

/// Loan term split into whole years and leftover months.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoanTerm {
    pub years: i64,
    pub months: i64,
}

impl LoanTerm {
    pub fn from_months(total_months: i64) -> Self {
        LoanTerm {
            years: total_months / MONTHS_PER_YEAR,
            months: total_months % MONTHS_PER_YEAR,
        }
    }
}

/// "2 years and 3 months", "1 year", "5 months"
impl fmt::Display for LoanTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let years = match self.years {
            0 => None,
            1 => Some("1 year".to_string()),
            n => Some(format!("{n} years")),
        };
        let months = match self.months {
            0 => None,
            1 => Some("1 month".to_string()),
            n => Some(format!("{n} months")),
        };
        let parts: Vec<String> = [years, months].into_iter().flatten().collect();
        write!(f, "{}", parts.join(" and "))
    }
}

/// Number of monthly payments needed to repay `principal`.
///
/// n = ln(A / (A - iP)) / ln(1 + i), rounded up to whole months. Fails with
/// `PaymentTooLow` when the payment does not exceed the monthly interest.
pub fn calculate_term(input: &TermInput) -> LoanCalcResult<ComputationOutput<TermOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    require_positive(input.payment, "payment")?;
    require_positive(input.principal, "principal")?;
    require_positive(input.annual_interest, "interest")?;

    let rate = monthly_rate(input.annual_interest);
    let accrual = checked_product(rate, input.principal, "monthly interest")?;
    let denominator = input.payment - accrual;
    if denominator <= Decimal::ZERO {
        return Err(LoanCalcError::PaymentTooLow {
            payment: input.payment,
            interest: accrual.round_dp(2),
        });
    }

    let ratio = input
        .payment
        .checked_div(denominator)
        .ok_or_else(|| LoanCalcError::Overflow {
            context: "payment / (payment - interest)".into(),
        })?;
    let ln_ratio = ratio.checked_ln().ok_or_else(|| LoanCalcError::Overflow {
        context: "ln(payment ratio)".into(),
    })?;
    let ln_growth = (Decimal::ONE + rate)
        .checked_ln()
        .ok_or_else(|| LoanCalcError::Overflow {
            context: "ln(1 + rate)".into(),
        })?;
    if ln_growth.is_zero() {
        return Err(LoanCalcError::DivisionByZero {
            context: "ln(1 + rate)".into(),
        });
    }

    let exact_months = ln_ratio / ln_growth;
    let months = exact_months.ceil();
    debug!(%rate, %exact_months, %months, "repayment term");
    if months != exact_months {
        warnings.push(format!(
            "Term rounded up from {} months; the final payment overshoots the balance.",
            exact_months.round_dp(2)
        ));
    }

    let total_paid = checked_product(input.payment, months, "total paid")?;
    let overpayment = (total_paid - input.principal).round();

    let total_months = to_whole(months, "total months")?;
    let term = LoanTerm::from_months(total_months);
    let output = TermOutput {
        total_months,
        years: term.years,
        months: term.months,
        total_paid: to_whole(total_paid, "total paid")?,
        overpayment: to_whole(overpayment, "overpayment")?,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Repayment term: ln(A / (A - iP)) / ln(1 + i), rounded up to whole months",
        input,
        warnings,
        elapsed,
        output,
    ))
}
