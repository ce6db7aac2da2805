use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::LoanCalcError;
use crate::types::Rate;
use crate::LoanCalcResult;

/// 12 months x 100 (percent to decimal)
pub const PERCENT_MONTHS: Decimal = dec!(1200);

/// Nominal monthly rate from an annual percentage (7.8 -> 0.0065).
pub fn monthly_rate(annual_interest: Rate) -> Rate {
    annual_interest / PERCENT_MONTHS
}

/// Discount factor v^periods with v = 1 / (1 + rate). Shrinks toward zero
/// for long terms instead of overflowing.
pub fn discount_factor(rate: Rate, periods: u32) -> LoanCalcResult<Decimal> {
    let one_plus_r = Decimal::ONE + rate;
    if one_plus_r.is_zero() {
        return Err(LoanCalcError::DivisionByZero {
            context: "discount factor".into(),
        });
    }
    (Decimal::ONE / one_plus_r)
        .checked_powi(i64::from(periods))
        .ok_or_else(|| LoanCalcError::Overflow {
            context: format!("discount factor over {periods} periods"),
        })
}

/// Annuity factor i / (1 - v^n), equal to i(1+i)^n / ((1+i)^n - 1): the
/// fixed payment per unit of principal.
pub fn annuity_factor(rate: Rate, periods: u32) -> LoanCalcResult<Decimal> {
    if periods == 0 {
        return Err(LoanCalcError::InvalidInput {
            field: "periods".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }
    if rate <= Decimal::ZERO {
        return Err(LoanCalcError::InvalidInput {
            field: "interest".into(),
            reason: "Monthly rate must be positive".into(),
        });
    }

    let denominator = Decimal::ONE - discount_factor(rate, periods)?;
    if denominator.is_zero() {
        return Err(LoanCalcError::DivisionByZero {
            context: "annuity factor".into(),
        });
    }

    rate.checked_div(denominator)
        .ok_or_else(|| LoanCalcError::Overflow {
            context: "annuity factor".into(),
        })
}
