use clap::Args;
use rust_decimal::Decimal;
use tracing::debug;

use loan_calc_core::{run, ComputationOutput, LoanCalcResult, LoanInput, LoanResult, PaymentType};

/// Loan parameters. Supply the payment type, the interest rate and two of
/// payment, principal and periods.
#[derive(Args, Debug, Default)]
pub struct LoanArgs {
    /// Payment type: "annuity" or "diff"
    #[arg(long = "type", value_name = "TYPE")]
    pub payment_type: Option<String>,

    /// Monthly payment (annuity only)
    #[arg(long, allow_negative_numbers = true)]
    pub payment: Option<i64>,

    /// Amount borrowed
    #[arg(long, allow_negative_numbers = true)]
    pub principal: Option<i64>,

    /// Number of monthly payments
    #[arg(long, allow_negative_numbers = true)]
    pub periods: Option<i64>,

    /// Annual interest rate in percent (always required)
    #[arg(long, allow_negative_numbers = true)]
    pub interest: Option<Decimal>,
}

impl LoanArgs {
    /// Build the core input. An empty `--type` counts as not given.
    pub fn to_input(&self) -> LoanCalcResult<LoanInput> {
        let payment_type = match self.payment_type.as_deref() {
            None | Some("") => None,
            Some(s) => Some(s.parse::<PaymentType>()?),
        };
        Ok(LoanInput {
            payment_type,
            payment: self.payment,
            principal: self.principal,
            periods: self.periods,
            interest: self.interest,
        })
    }
}

pub fn run_loan(args: &LoanArgs) -> LoanCalcResult<ComputationOutput<LoanResult>> {
    let input = args.to_input()?;
    debug!(?input, "parsed loan parameters");
    run(&input)
}
