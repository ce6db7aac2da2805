//! Fixed-payment (annuity) loans: solve for whichever of payment,
//! principal or term is missing.

pub mod payment;
pub mod principal;
pub mod term;

use rust_decimal::Decimal;

use crate::error::LoanCalcError;
use crate::LoanCalcResult;

/// Reject a non-positive monetary amount or rate.
pub(crate) fn require_positive(value: Decimal, field: &str) -> LoanCalcResult<()> {
    if value <= Decimal::ZERO {
        return Err(LoanCalcError::InvalidInput {
            field: field.to_string(),
            reason: format!("{field} must be positive"),
        });
    }
    Ok(())
}

/// Checked product, reported as overflow in `context`.
pub(crate) fn checked_product(a: Decimal, b: Decimal, context: &str) -> LoanCalcResult<Decimal> {
    a.checked_mul(b).ok_or_else(|| LoanCalcError::Overflow {
        context: context.to_string(),
    })
}
