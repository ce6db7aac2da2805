use loan_calc_core::LoanResult;

/// Human-readable result, one statement per line.
pub fn render_text(result: &LoanResult) -> String {
    match result {
        LoanResult::Term(t) => format!(
            "It will take {} to repay this loan!\nOverpayment = {}",
            t.term(),
            t.overpayment
        ),
        LoanResult::Payment(p) => format!(
            "Your annuity payment = {}!\nOverpayment = {}",
            p.monthly_payment, p.overpayment
        ),
        LoanResult::Principal(p) => format!(
            "Your loan principal = {}!\nOverpayment = {}",
            p.principal, p.overpayment
        ),
        LoanResult::Schedule(s) => {
            let mut lines: Vec<String> = s
                .payments
                .iter()
                .map(|p| format!("Month {}: payment is {}", p.month, p.payment))
                .collect();
            lines.push(String::new());
            lines.push(format!("Overpayment = {}", s.overpayment));
            lines.join("\n")
        }
    }
}
