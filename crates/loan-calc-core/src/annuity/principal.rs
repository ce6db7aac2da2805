use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use super::{checked_product, require_positive};
use crate::error::LoanCalcError;
use crate::time_value::{annuity_factor, monthly_rate};
use crate::types::*;
use crate::LoanCalcResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrincipalInput {
    pub payment: Money,
    pub periods: u32,
    /// Annual interest in percent
    pub annual_interest: Rate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrincipalOutput {
    /// Largest whole principal the payment can service
    pub principal: i64,
    pub total_paid: i64,
    pub overpayment: i64,
}

/// Principal that a fixed monthly payment repays over `periods` months.
///
/// Rounded down: the borrower cannot take more than the payment services.
pub fn calculate_principal(
    input: &PrincipalInput,
) -> LoanCalcResult<ComputationOutput<PrincipalOutput>> {
    let start = Instant::now();
    let warnings: Vec<String> = Vec::new();

    require_positive(input.payment, "payment")?;
    require_positive(input.annual_interest, "interest")?;

    let rate = monthly_rate(input.annual_interest);
    let factor = annuity_factor(rate, input.periods)?;
    let principal = input
        .payment
        .checked_div(factor)
        .ok_or_else(|| LoanCalcError::Overflow {
            context: "loan principal".into(),
        })?
        .floor();
    debug!(%rate, %factor, %principal, "loan principal");

    let total_paid = checked_product(input.payment, Decimal::from(input.periods), "total paid")?;
    let overpayment = (total_paid - principal).round();

    let output = PrincipalOutput {
        principal: to_whole(principal, "principal")?,
        total_paid: to_whole(total_paid, "total paid")?,
        overpayment: to_whole(overpayment, "overpayment")?,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Loan principal: A / (i(1+i)^n / ((1+i)^n - 1)), rounded down",
        input,
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_principal_rounds_down() {
        let input = PrincipalInput {
            payment: dec!(8722),
            periods: 120,
            annual_interest: dec!(5.6),
        };
        let result = calculate_principal(&input).unwrap();
        // Formula gives ~800018.69
        assert_eq!(result.result.principal, 800_018);
        assert_eq!(result.result.total_paid, 1_046_640);
        assert_eq!(result.result.overpayment, 246_622);
    }

    #[test]
    fn test_long_term_principal() {
        let input = PrincipalInput {
            payment: dec!(6898),
            periods: 240,
            annual_interest: dec!(3.4),
        };
        let result = calculate_principal(&input).unwrap();
        // ~1199997.96
        assert_eq!(result.result.principal, 1_199_997);
        assert_eq!(result.result.overpayment, 455_523);
    }

    #[test]
    fn test_long_term_principal_does_not_overflow() {
        let input = PrincipalInput {
            payment: dec!(8334),
            periods: 9000,
            annual_interest: dec!(10),
        };
        let result = calculate_principal(&input).unwrap();
        assert_eq!(result.result.principal, 1_000_080);
    }

    #[test]
    fn test_rejects_negative_payment() {
        let input = PrincipalInput {
            payment: dec!(-1),
            periods: 12,
            annual_interest: dec!(5),
        };
        assert!(matches!(
            calculate_principal(&input),
            Err(LoanCalcError::InvalidInput { .. })
        ));
    }
}
