use chrono::NaiveDate;
use clap::Parser;
use log::LevelFilter;
use mortgage::session::{self, SessionOptions};
use simple_logger::SimpleLogger;
use std::error::Error;
use std::io;

/// Interactive fixed-rate mortgage calculator.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Date of the first monthly payment (YYYY-MM-DD); adds a due date column
    #[arg(long)]
    first_payment: Option<NaiveDate>,

    /// Print only the repayment summary, without the amortization schedule
    #[arg(long)]
    no_schedule: bool,

    /// Log level for diagnostics written to stderr
    #[arg(long, default_value = "warn")]
    log_level: LevelFilter,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    SimpleLogger::new().with_level(cli.log_level).init()?;

    let options = SessionOptions {
        show_schedule: !cli.no_schedule,
        first_payment: cli.first_payment,
    };
    session::run(io::stdin().lock(), io::stdout().lock(), &options)?;
    Ok(())
}

// verifies that types can implement the gated traits below
#[cfg(test)]
fn is_normal<T: Sized + Send + Sync + Unpin>() {}

#[test]
fn normal_types() {
    is_normal::<mortgage::loan::LoanParameters>();
    is_normal::<mortgage::loan::RepaymentSummary>();
    is_normal::<mortgage::loan::ScheduleRow>();
    is_normal::<mortgage::loan::Amortization>();
    is_normal::<SessionOptions>();
}

#[test]
fn verify_cli() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
