use rust_decimal::Decimal;
use thiserror::Error;

/// Generic message shown for any malformed or unsupported input.
pub const INCORRECT_PARAMETERS: &str = "Incorrect parameters.";

/// Message shown when the payment cannot even cover the monthly interest.
pub const PAYMENT_TOO_LOW: &str =
    "The payment is too low to cover the interest. Please increase your payment.";

#[derive(Debug, Error)]
pub enum LoanCalcError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Unsupported parameter combination: {0}")]
    UnsupportedCombination(String),

    #[error("Payment of {payment} does not cover the monthly interest of {interest}")]
    PaymentTooLow { payment: Decimal, interest: Decimal },

    #[error("Arithmetic overflow in {context}")]
    Overflow { context: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl LoanCalcError {
    /// True when the inputs were well-formed but describe a loan that can
    /// never be repaid.
    pub fn is_infeasible(&self) -> bool {
        matches!(self, LoanCalcError::PaymentTooLow { .. })
    }

    /// The message shown to the user. Malformed input is not
    /// broken down any further.
    pub fn user_message(&self) -> &'static str {
        if self.is_infeasible() {
            PAYMENT_TOO_LOW
        } else {
            INCORRECT_PARAMETERS
        }
    }
}

impl From<serde_json::Error> for LoanCalcError {
    fn from(e: serde_json::Error) -> Self {
        LoanCalcError::SerializationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_malformed_input_gets_generic_message() {
        let err = LoanCalcError::InvalidInput {
            field: "principal".into(),
            reason: "must be at least 1".into(),
        };
        assert!(!err.is_infeasible());
        assert_eq!(err.user_message(), INCORRECT_PARAMETERS);

        let err = LoanCalcError::Overflow {
            context: "discount factor".into(),
        };
        assert_eq!(err.user_message(), INCORRECT_PARAMETERS);
    }

    #[test]
    fn test_payment_too_low_is_distinct() {
        let err = LoanCalcError::PaymentTooLow {
            payment: dec!(1000),
            interest: dec!(3250),
        };
        assert!(err.is_infeasible());
        assert_eq!(err.user_message(), PAYMENT_TOO_LOW);
        assert_eq!(
            err.to_string(),
            "Payment of 1000 does not cover the monthly interest of 3250"
        );
    }
}
