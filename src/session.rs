use crate::input::{InputError, Prompter, RepeatAnswer};
use crate::report;
use chrono::NaiveDate;
use log::{debug, info};
use std::io::{BufRead, Write};

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct SessionOptions {
    pub show_schedule: bool,
    pub first_payment: Option<NaiveDate>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            show_schedule: true,
            first_payment: None,
        }
    }
}

/// Runs the calculator until the user answers `n` or input runs out.
pub fn run<R: BufRead, W: Write>(
    input: R,
    output: W,
    options: &SessionOptions,
) -> Result<(), InputError> {
    let mut prompter = Prompter::new(input, output);
    report::write_banner(prompter.output())?;
    debug!("session started with {:?}", options);

    match calculate_until_stopped(&mut prompter, options) {
        Err(InputError::EndOfInput) => {
            debug!("input closed, ending session");
            writeln!(prompter.output())?;
            Ok(())
        }
        result => result,
    }
}

fn calculate_until_stopped<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    options: &SessionOptions,
) -> Result<(), InputError> {
    loop {
        let loan = prompter.loan_parameters()?;
        let summary = loan.summary();
        info!(
            "principal {}, rate {}%, {} years: payment {}, interest {}, total {}",
            loan.principal,
            loan.annual_rate,
            loan.term_years,
            summary.monthly_payment,
            summary.total_interest,
            summary.total_paid
        );

        let out = prompter.output();
        report::write_summary(out, &summary)?;
        if options.show_schedule {
            report::write_schedule(out, &loan.schedule(), options.first_payment)?;
        }

        if prompter.repeat_answer()? == RepeatAnswer::Stop {
            debug!("session stopped by user");
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{run, SessionOptions};
    use chrono::NaiveDate;
    use test_log::test;

    fn run_script(script: &str, options: SessionOptions) -> String {
        let mut output = Vec::new();
        run(script.as_bytes(), &mut output, &options).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_single_calculation() {
        let out = run_script("100000\n6\n30\nn\n", SessionOptions::default());

        assert!(out.starts_with(
            "------------------------------------\nWelcome to the Mortgage Calculator!"
        ));
        assert!(out.contains("Monthly Repayment Amount: $599.55"));
        assert!(out.contains("Total Interest Paid: $115,838.19"));
        assert!(out.contains("Total Amount Paid: $215,838.19"));
        assert!(out.contains("Amortization Schedule:"));
        assert!(out.contains("      360 "));
        assert!(!out.contains("      361 "));
    }

    #[test]
    fn test_repeat_until_stopped() {
        let script = "50000\n5\n1\n\n200000\n4.5\n15\nmaybe\ny\n1000\n1\n1\nn\n";
        let out = run_script(script, SessionOptions::default());

        assert_eq!(out.matches("Monthly Repayment Amount:").count(), 3);
        assert_eq!(out.matches("another calculation?").count(), 4);
        assert!(out.contains("$4,280.37"));
        assert!(out.contains("$750.00"));
    }

    #[test]
    fn test_summary_only() {
        let options = SessionOptions {
            show_schedule: false,
            first_payment: None,
        };
        let out = run_script("200000\n4.5\n15\nn\n", options);

        assert!(out.contains("Monthly Repayment Amount: $1,529.99"));
        assert!(!out.contains("Amortization Schedule:"));
    }

    #[test]
    fn test_due_dates() {
        let options = SessionOptions {
            show_schedule: true,
            first_payment: NaiveDate::from_ymd_opt(2024, 4, 1),
        };
        let out = run_script("50000\n5\n1\nn\n", options);

        assert!(out.contains("Due Date"));
        assert!(out.contains("2024-04-01"));
        assert!(out.contains("2025-03-01"));
        assert!(!out.contains("2025-04-01"));
    }

    #[test]
    fn test_invalid_utf8_line_is_reprompted() {
        let mut script = vec![0xff, 0xfe, b'\n'];
        script.extend_from_slice(b"100000\n6\n30\nn\n");
        let mut output = Vec::new();
        run(script.as_slice(), &mut output, &SessionOptions::default()).unwrap();

        let out = String::from_utf8(output).unwrap();
        assert!(out.contains("Please enter valid amounts."));
        assert!(out.contains("Monthly Repayment Amount: $599.55"));
    }

    #[test]
    fn test_end_of_input_ends_session() {
        let out = run_script("100000\n6\n", SessionOptions::default());

        assert!(out.contains("Enter the loan term in years: "));
        assert!(!out.contains("Monthly Repayment Amount:"));
    }
}
