use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::annuity::{checked_product, require_positive};
use crate::error::LoanCalcError;
use crate::time_value::{monthly_rate, PERCENT_MONTHS};
use crate::types::*;
use crate::LoanCalcResult;

/// Longest schedule produced: 10 000 years of monthly rows.
const MAX_SCHEDULE_MONTHS: u32 = 120_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifferentiatedInput {
    pub principal: Money,
    pub periods: u32,
    /// Annual interest in percent
    pub annual_interest: Rate,
}

/// One month of a differentiated schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledPayment {
    /// 1-indexed
    pub month: u32,
    pub principal_portion: Money,
    pub interest_portion: Money,
    /// Whole units, rounded up
    pub payment: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifferentiatedOutput {
    pub payments: Vec<ScheduledPayment>,
    pub total_paid: i64,
    pub overpayment: i64,
}

impl DifferentiatedOutput {
    /// The per-month payment amounts in schedule order.
    pub fn amounts(&self) -> Vec<i64> {
        self.payments.iter().map(|p| p.payment).collect()
    }
}

/// Build a differentiated repayment schedule.
///
/// Each month repays an equal slice of principal plus interest on the
/// balance still outstanding, so payments shrink over the term.
pub fn calculate_differentiated(
    input: &DifferentiatedInput,
) -> LoanCalcResult<ComputationOutput<DifferentiatedOutput>> {
    let start = Instant::now();
    let warnings: Vec<String> = Vec::new();

    require_positive(input.principal, "principal")?;
    require_positive(input.annual_interest, "interest")?;
    if input.periods == 0 {
        return Err(LoanCalcError::InvalidInput {
            field: "periods".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }
    if input.periods > MAX_SCHEDULE_MONTHS {
        return Err(LoanCalcError::InvalidInput {
            field: "periods".into(),
            reason: format!("schedules are limited to {MAX_SCHEDULE_MONTHS} months"),
        });
    }

    let rate = monthly_rate(input.annual_interest);
    let n = Decimal::from(input.periods);
    let base = input.principal / n;
    // Each payment is one exact quotient:
    // (1200 P + interest * P * (n - m + 1)) / (1200 n)
    let scaled_principal =
        checked_product(PERCENT_MONTHS, input.principal, "scheduled payment")?;
    let scaled_periods = PERCENT_MONTHS * n;
    let interest_per_month =
        checked_product(input.annual_interest, input.principal, "scheduled payment")?;

    let mut payments = Vec::with_capacity(input.periods as usize);
    let mut total_paid: i64 = 0;
    for month in 1..=input.periods {
        let remaining = Decimal::from(input.periods - month + 1);
        let numerator = checked_product(interest_per_month, remaining, "scheduled payment")?
            .checked_add(scaled_principal)
            .ok_or_else(|| LoanCalcError::Overflow {
                context: "scheduled payment".into(),
            })?;
        let payment = to_whole((numerator / scaled_periods).ceil(), "scheduled payment")?;
        total_paid = total_paid
            .checked_add(payment)
            .ok_or_else(|| LoanCalcError::Overflow {
                context: "total paid".into(),
            })?;

        let interest = rate * input.principal * remaining / n;
        payments.push(ScheduledPayment {
            month,
            principal_portion: base.round_dp(2),
            interest_portion: interest.round_dp(2),
            payment,
        });
    }

    let principal = to_whole(input.principal, "principal")?;
    let overpayment = total_paid - principal;
    debug!(%rate, months = input.periods, total_paid, overpayment, "differentiated schedule");

    let output = DifferentiatedOutput {
        payments,
        total_paid,
        overpayment,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Differentiated: P/n + i(P - P(m-1)/n) per month, each rounded up",
        input,
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_eight_month_schedule() {
        let input = DifferentiatedInput {
            principal: dec!(500_000),
            periods: 8,
            annual_interest: dec!(7.8),
        };
        let result = calculate_differentiated(&input).unwrap();
        let out = &result.result;
        assert_eq!(
            out.amounts(),
            vec![65750, 65344, 64938, 64532, 64125, 63719, 63313, 62907]
        );
        assert_eq!(out.overpayment, 14_628);
        assert_eq!(out.total_paid, 514_628);
    }

    #[test]
    fn test_ten_month_schedule() {
        let input = DifferentiatedInput {
            principal: dec!(1_000_000),
            periods: 10,
            annual_interest: dec!(10),
        };
        let result = calculate_differentiated(&input).unwrap();
        assert_eq!(
            result.result.amounts(),
            vec![108334, 107500, 106667, 105834, 105000, 104167, 103334, 102500, 101667, 100834]
        );
        assert_eq!(result.result.overpayment, 45_837);
    }

    #[test]
    fn test_whole_amounts_are_not_rounded_up() {
        // 83333.33.. + 4666.66.. is exactly 88000 in month 1
        let input = DifferentiatedInput {
            principal: dec!(1_000_000),
            periods: 12,
            annual_interest: dec!(5.6),
        };
        let result = calculate_differentiated(&input).unwrap();
        assert_eq!(
            result.result.amounts(),
            vec![
                88000, 87612, 87223, 86834, 86445, 86056, 85667, 85278, 84889, 84500, 84112,
                83723
            ]
        );
        assert_eq!(result.result.overpayment, 30_339);

        let input = DifferentiatedInput {
            principal: dec!(500_000),
            periods: 12,
            annual_interest: dec!(5.6),
        };
        let result = calculate_differentiated(&input).unwrap();
        assert_eq!(
            result.result.amounts(),
            vec![
                44000, 43806, 43612, 43417, 43223, 43028, 42834, 42639, 42445, 42250, 42056,
                41862
            ]
        );
        assert_eq!(result.result.overpayment, 15_172);
    }

    #[test]
    fn test_long_schedule() {
        let input = DifferentiatedInput {
            principal: dec!(1_000_000),
            periods: 12_001,
            annual_interest: dec!(10),
        };
        let result = calculate_differentiated(&input).unwrap();
        assert_eq!(result.result.payments.len(), 12_001);
        assert_eq!(result.result.payments[12_000].month, 12_001);
    }

    #[test]
    fn test_portions() {
        let input = DifferentiatedInput {
            principal: dec!(500_000),
            periods: 8,
            annual_interest: dec!(7.8),
        };
        let result = calculate_differentiated(&input).unwrap();
        let second = &result.result.payments[1];
        assert_eq!(second.month, 2);
        assert_eq!(second.principal_portion, dec!(62500));
        // 0.0065 * 437500
        assert_eq!(second.interest_portion, dec!(2843.75));
    }

    #[test]
    fn test_single_period() {
        let input = DifferentiatedInput {
            principal: dec!(1000),
            periods: 1,
            annual_interest: dec!(12),
        };
        let result = calculate_differentiated(&input).unwrap();
        assert_eq!(result.result.amounts(), vec![1010]);
        assert_eq!(result.result.overpayment, 10);
    }

    #[test]
    fn test_rejects_overlong_schedule() {
        let input = DifferentiatedInput {
            principal: dec!(1000),
            periods: MAX_SCHEDULE_MONTHS + 1,
            annual_interest: dec!(12),
        };
        assert!(calculate_differentiated(&input).is_err());
    }

    #[test]
    fn test_rejects_zero_periods() {
        let input = DifferentiatedInput {
            principal: dec!(1000),
            periods: 0,
            annual_interest: dec!(12),
        };
        assert!(matches!(
            calculate_differentiated(&input),
            Err(LoanCalcError::InvalidInput { .. })
        ));
    }
}
