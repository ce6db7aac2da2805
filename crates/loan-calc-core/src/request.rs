//! Raw loan parameters and the validation that turns them into exactly one
//! calculation request.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::annuity::payment::AnnuityPaymentInput;
use crate::annuity::principal::PrincipalInput;
use crate::annuity::term::TermInput;
use crate::differentiated::DifferentiatedInput;
use crate::error::LoanCalcError;
use crate::types::Rate;
use crate::LoanCalcResult;

/// At least this many of the five parameters must be supplied.
const MIN_PRESENT_FIELDS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    Annuity,
    Diff,
}

impl FromStr for PaymentType {
    type Err = LoanCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "annuity" => Ok(PaymentType::Annuity),
            "diff" => Ok(PaymentType::Diff),
            other => Err(LoanCalcError::InvalidInput {
                field: "type".into(),
                reason: format!("unknown payment type '{other}'"),
            }),
        }
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentType::Annuity => write!(f, "annuity"),
            PaymentType::Diff => write!(f, "diff"),
        }
    }
}

/// The five optional loan parameters exactly as supplied.
///
/// Amounts are signed so that negative values survive parsing and are
/// rejected by [`validate`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanInput {
    pub payment_type: Option<PaymentType>,
    pub payment: Option<i64>,
    pub principal: Option<i64>,
    pub periods: Option<i64>,
    /// Annual interest in percent
    pub interest: Option<Rate>,
}

impl LoanInput {
    /// Number of parameters supplied, the payment type included.
    pub fn present_count(&self) -> usize {
        [
            self.payment_type.is_some(),
            self.payment.is_some(),
            self.principal.is_some(),
            self.periods.is_some(),
            self.interest.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }
}

/// A loan parameter, used to describe what a mode needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Payment,
    Principal,
    Periods,
    Interest,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::Payment => "payment",
            Field::Principal => "principal",
            Field::Periods => "periods",
            Field::Interest => "interest",
        }
    }
}

/// Which calculation a set of parameters asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanMode {
    /// `diff` without a payment: per-month schedule
    Differentiated,
    /// `annuity` without a payment: solve for the monthly payment
    AnnuityPayment,
    /// `annuity` without a principal: solve for the principal
    AnnuityPrincipal,
    /// `annuity` without periods: solve for the term
    AnnuityTerm,
}

impl LoanMode {
    /// Pick the mode from which parameters are absent. Rules are checked in
    /// order and the first match wins.
    pub fn detect(input: &LoanInput) -> LoanCalcResult<LoanMode> {
        match (
            input.payment_type,
            input.payment.is_none(),
            input.principal.is_none(),
            input.periods.is_none(),
        ) {
            (Some(PaymentType::Diff), true, _, _) => Ok(LoanMode::Differentiated),
            (Some(PaymentType::Annuity), true, _, _) => Ok(LoanMode::AnnuityPayment),
            (Some(PaymentType::Annuity), _, true, _) => Ok(LoanMode::AnnuityPrincipal),
            (Some(PaymentType::Annuity), _, _, true) => Ok(LoanMode::AnnuityTerm),
            (Some(PaymentType::Diff), false, _, _) => Err(LoanCalcError::UnsupportedCombination(
                "a differentiated schedule cannot take a fixed payment".into(),
            )),
            (Some(PaymentType::Annuity), false, false, false) => {
                Err(LoanCalcError::UnsupportedCombination(
                    "payment, principal and periods are all given; nothing to solve for".into(),
                ))
            }
            (None, _, _, _) => Err(LoanCalcError::UnsupportedCombination(
                "payment type is required".into(),
            )),
        }
    }

    /// Parameters the mode's calculator needs.
    pub fn required_fields(&self) -> &'static [Field] {
        match self {
            LoanMode::Differentiated | LoanMode::AnnuityPayment => {
                &[Field::Principal, Field::Periods, Field::Interest]
            }
            LoanMode::AnnuityPrincipal => &[Field::Payment, Field::Periods, Field::Interest],
            LoanMode::AnnuityTerm => &[Field::Payment, Field::Principal, Field::Interest],
        }
    }
}

impl fmt::Display for LoanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LoanMode::Differentiated => "differentiated schedule",
            LoanMode::AnnuityPayment => "annuity payment",
            LoanMode::AnnuityPrincipal => "loan principal",
            LoanMode::AnnuityTerm => "repayment term",
        };
        write!(f, "{s}")
    }
}

/// A validated request, carrying only what its calculator needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum LoanRequest {
    Differentiated(DifferentiatedInput),
    AnnuityPayment(AnnuityPaymentInput),
    AnnuityPrincipal(PrincipalInput),
    AnnuityTerm(TermInput),
}

impl LoanRequest {
    pub fn mode(&self) -> LoanMode {
        match self {
            LoanRequest::Differentiated(_) => LoanMode::Differentiated,
            LoanRequest::AnnuityPayment(_) => LoanMode::AnnuityPayment,
            LoanRequest::AnnuityPrincipal(_) => LoanMode::AnnuityPrincipal,
            LoanRequest::AnnuityTerm(_) => LoanMode::AnnuityTerm,
        }
    }
}

/// Validate raw parameters and select the calculation.
///
/// Checks, in order: every supplied number is at least 1, at least four
/// parameters are supplied, the absent parameter maps to a known mode, and
/// the mode's required parameters are all present.
pub fn validate(input: &LoanInput) -> LoanCalcResult<LoanRequest> {
    check_at_least_one(Field::Payment, input.payment)?;
    check_at_least_one(Field::Principal, input.principal)?;
    check_at_least_one(Field::Periods, input.periods)?;
    if let Some(interest) = input.interest {
        if interest < Decimal::ONE {
            return Err(LoanCalcError::InvalidInput {
                field: Field::Interest.name().into(),
                reason: format!("must be at least 1, got {interest}"),
            });
        }
    }

    let present = input.present_count();
    if present < MIN_PRESENT_FIELDS {
        return Err(LoanCalcError::InvalidInput {
            field: "parameters".into(),
            reason: format!("expected at least {MIN_PRESENT_FIELDS} of 5, got {present}"),
        });
    }

    let mode = LoanMode::detect(input)?;
    for field in mode.required_fields() {
        let present = match field {
            Field::Payment => input.payment.is_some(),
            Field::Principal => input.principal.is_some(),
            Field::Periods => input.periods.is_some(),
            Field::Interest => input.interest.is_some(),
        };
        if !present {
            return Err(LoanCalcError::InvalidInput {
                field: field.name().into(),
                reason: format!("required for {mode}"),
            });
        }
    }
    debug!(%mode, "selected calculation");

    let request = match mode {
        LoanMode::Differentiated => LoanRequest::Differentiated(DifferentiatedInput {
            principal: money(Field::Principal, input.principal)?,
            periods: months(input.periods)?,
            annual_interest: interest(input.interest)?,
        }),
        LoanMode::AnnuityPayment => LoanRequest::AnnuityPayment(AnnuityPaymentInput {
            principal: money(Field::Principal, input.principal)?,
            periods: months(input.periods)?,
            annual_interest: interest(input.interest)?,
        }),
        LoanMode::AnnuityPrincipal => LoanRequest::AnnuityPrincipal(PrincipalInput {
            payment: money(Field::Payment, input.payment)?,
            periods: months(input.periods)?,
            annual_interest: interest(input.interest)?,
        }),
        LoanMode::AnnuityTerm => LoanRequest::AnnuityTerm(TermInput {
            payment: money(Field::Payment, input.payment)?,
            principal: money(Field::Principal, input.principal)?,
            annual_interest: interest(input.interest)?,
        }),
    };
    Ok(request)
}

fn check_at_least_one(field: Field, value: Option<i64>) -> LoanCalcResult<()> {
    match value {
        Some(v) if v < 1 => Err(LoanCalcError::InvalidInput {
            field: field.name().into(),
            reason: format!("must be at least 1, got {v}"),
        }),
        _ => Ok(()),
    }
}

fn missing(field: Field) -> LoanCalcError {
    LoanCalcError::InvalidInput {
        field: field.name().into(),
        reason: "missing".into(),
    }
}

fn money(field: Field, value: Option<i64>) -> LoanCalcResult<Decimal> {
    value.map(Decimal::from).ok_or_else(|| missing(field))
}

fn months(value: Option<i64>) -> LoanCalcResult<u32> {
    let v = value.ok_or_else(|| missing(Field::Periods))?;
    u32::try_from(v).map_err(|_| LoanCalcError::InvalidInput {
        field: Field::Periods.name().into(),
        reason: format!("{v} months is out of range"),
    })
}

fn interest(value: Option<Rate>) -> LoanCalcResult<Rate> {
    value.ok_or_else(|| missing(Field::Interest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn annuity() -> LoanInput {
        LoanInput {
            payment_type: Some(PaymentType::Annuity),
            ..LoanInput::default()
        }
    }

    #[test]
    fn test_parse_payment_type() {
        assert_eq!("annuity".parse::<PaymentType>().unwrap(), PaymentType::Annuity);
        assert_eq!("diff".parse::<PaymentType>().unwrap(), PaymentType::Diff);
        assert!("Annuity".parse::<PaymentType>().is_err());
        assert!("mortgage".parse::<PaymentType>().is_err());
    }

    #[test]
    fn test_present_count() {
        assert_eq!(LoanInput::default().present_count(), 0);
        let input = LoanInput {
            principal: Some(1000),
            interest: Some(dec!(5)),
            ..annuity()
        };
        assert_eq!(input.present_count(), 3);
    }

    #[test]
    fn test_detect_first_match_wins() {
        // Payment and principal both absent: the payment rule comes first
        let input = LoanInput {
            periods: Some(12),
            interest: Some(dec!(5)),
            ..annuity()
        };
        assert_eq!(LoanMode::detect(&input).unwrap(), LoanMode::AnnuityPayment);
    }

    #[test]
    fn test_required_fields_cover_the_other_three() {
        for mode in [
            LoanMode::Differentiated,
            LoanMode::AnnuityPayment,
            LoanMode::AnnuityPrincipal,
            LoanMode::AnnuityTerm,
        ] {
            let fields = mode.required_fields();
            assert_eq!(fields.len(), 3);
            assert!(fields.contains(&Field::Interest));
        }
    }

    #[test]
    fn test_periods_out_of_range() {
        let input = LoanInput {
            principal: Some(1000),
            periods: Some(i64::from(u32::MAX) + 1),
            interest: Some(dec!(5)),
            ..annuity()
        };
        assert!(matches!(
            validate(&input),
            Err(LoanCalcError::InvalidInput { ref field, .. }) if field == "periods"
        ));
    }
}
