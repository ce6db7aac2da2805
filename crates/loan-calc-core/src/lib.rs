pub mod annuity;
pub mod calculator;
pub mod differentiated;
pub mod error;
pub mod request;
pub mod time_value;
pub mod types;

pub use calculator::{calculate, run, LoanResult};
pub use error::{LoanCalcError, INCORRECT_PARAMETERS, PAYMENT_TOO_LOW};
pub use request::{LoanInput, LoanMode, LoanRequest, PaymentType};
pub use types::*;

/// Standard result type for all loan-calc operations
pub type LoanCalcResult<T> = Result<T, LoanCalcError>;
