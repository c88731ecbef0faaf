use crate::loan::{RepaymentSummary, ScheduleRow};
use chrono::{Months, NaiveDate};
use std::io::{self, Write};

/// Formats an amount as dollars and cents with thousands separators.
///
/// Amounts that round to zero cents print as `$0.00`, so the residual a
/// schedule leaves behind in its final balance never shows up as `-$0.00`.
pub fn format_currency(amount: f64) -> String {
    let cents = (amount * 100.).round();
    if !cents.is_finite() {
        return format!("${}", amount);
    }

    let sign = if cents < 0. { "-" } else { "" };
    let cents = cents.abs();
    let dollars = format!("{}", (cents / 100.).trunc());

    format!(
        "{}${}.{:02}",
        sign,
        group_thousands(&dollars),
        (cents % 100.) as u8
    )
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, digit) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Date on which payment `period` falls due, counting whole months from the
/// first payment. Days past the end of a short month clamp to its last day.
pub fn due_date(first_payment: NaiveDate, period: u64) -> Option<NaiveDate> {
    let months = u32::try_from(period.saturating_sub(1)).ok()?;
    first_payment.checked_add_months(Months::new(months))
}

pub fn write_banner<W: Write>(w: &mut W) -> io::Result<()> {
    writeln!(
        w,
        "------------------------------------\nWelcome to the Mortgage Calculator!\n------------------------------------"
    )
}

pub fn write_invalid_input<W: Write>(w: &mut W) -> io::Result<()> {
    writeln!(
        w,
        "\n----------------------------\nPlease enter valid amounts.\n----------------------------"
    )
}

pub fn write_summary<W: Write>(w: &mut W, summary: &RepaymentSummary) -> io::Result<()> {
    writeln!(
        w,
        "\nMonthly Repayment Amount: {}",
        format_currency(summary.monthly_payment)
    )?;
    writeln!(
        w,
        "Total Interest Paid: {}",
        format_currency(summary.total_interest)
    )?;
    writeln!(w, "Total Amount Paid: {}", format_currency(summary.total_paid))
}

pub fn write_schedule<'a, W, I>(
    w: &mut W,
    rows: I,
    first_payment: Option<NaiveDate>,
) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a ScheduleRow>,
{
    writeln!(w, "\nAmortization Schedule:")?;

    write!(w, "{:>9}", "Payment #")?;
    if first_payment.is_some() {
        write!(w, "  {:>10}", "Due Date")?;
    }
    writeln!(
        w,
        "  {:>16}  {:>16}  {:>16}  {:>18}",
        "Payment Amount", "Interest Paid", "Principal Paid", "Remaining Balance"
    )?;

    for row in rows {
        write!(w, "{:>9}", row.period)?;
        if let Some(first) = first_payment {
            match due_date(first, row.period) {
                Some(date) => write!(w, "  {:>10}", date)?,
                None => write!(w, "  {:>10}", "-")?,
            }
        }
        writeln!(
            w,
            "  {:>16}  {:>16}  {:>16}  {:>18}",
            format_currency(row.payment),
            format_currency(row.interest),
            format_currency(row.principal),
            format_currency(row.balance)
        )?;
    }
    Ok(())
}
