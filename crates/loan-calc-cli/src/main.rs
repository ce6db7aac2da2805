mod commands;
mod output;

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::process;
use tracing::{debug, Level};

use commands::loan::LoanArgs;
use loan_calc_core::INCORRECT_PARAMETERS;

/// Annuity and differentiated loan calculator
#[derive(Parser)]
#[command(
    name = "loancalc",
    version,
    about = "Annuity and differentiated loan calculator",
    long_about = "Given three of monthly payment, principal and number of months (plus the \
                  annual interest rate), computes the missing one and the total overpayment. \
                  With --type=diff, prints a month-by-month differentiated payment schedule."
)]
struct Cli {
    #[command(flatten)]
    loan: LoanArgs,

    /// Output format
    #[arg(long, default_value = "text")]
    output: OutputFormat,

    /// Log diagnostics and the detailed error cause to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Table,
    Csv,
    Minimal,
}

/// What one invocation prints and how it exits.
#[derive(Debug, PartialEq, Eq)]
pub struct Outcome {
    /// Text for stdout, newline-terminated.
    pub stdout: String,
    /// Detailed error cause for stderr, set only with `--verbose`.
    pub detail: Option<String>,
    pub code: i32,
}

impl Outcome {
    fn failure(message: &str, detail: Option<String>) -> Self {
        Outcome {
            stdout: format!("{}\n", message),
            detail,
            code: 1,
        }
    }
}

/// Run the calculator on a full argument list. Only `--help` and
/// `--version` come back as `Err`, so clap can print and exit on its own.
pub fn execute<I, T>(args: I) -> Result<Outcome, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            return Err(e)
        }
        Err(e) => {
            debug!(kind = ?e.kind(), "argument parsing failed");
            return Ok(Outcome::failure(INCORRECT_PARAMETERS, None));
        }
    };

    if cli.verbose {
        // A subscriber may already be installed when called repeatedly.
        let _ = tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_writer(std::io::stderr)
            .try_init();
    }

    let rendered = commands::loan::run_loan(&cli.loan)
        .and_then(|out| output::render_output(&cli.output, &out));

    Ok(match rendered {
        Ok(stdout) => Outcome {
            stdout,
            detail: None,
            code: 0,
        },
        Err(e) => {
            let detail = cli
                .verbose
                .then(|| format!("{}: {}", "error".red().bold(), e));
            Outcome::failure(e.user_message(), detail)
        }
    })
}

fn main() {
    let outcome = match execute(std::env::args_os()) {
        Ok(outcome) => outcome,
        Err(e) => e.exit(),
    };
    if let Some(detail) = &outcome.detail {
        eprintln!("{}", detail);
    }
    print!("{}", outcome.stdout);
    process::exit(outcome.code);
}
