use log::trace;
use std::{fmt, iter::FusedIterator};

/// Terms of a fixed-rate, fixed-term loan repaid monthly.
///
/// The calculation functions expect every field to be strictly positive.
/// Nothing here checks that; `input` rejects bad values before a
/// `LoanParameters` is ever built from console text.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoanParameters {
    pub principal: f64,
    pub annual_rate: f64, // annual interest rate as a percentage (i.e., 4.5, 7.0)
    pub term_years: u32,
}

impl LoanParameters {
    pub fn new(principal: f64, annual_rate: f64, term_years: u32) -> Self {
        Self {
            principal,
            annual_rate,
            term_years,
        }
    }

    pub fn payment_count(&self) -> u64 {
        payment_count(self.term_years)
    }

    pub fn summary(&self) -> RepaymentSummary {
        RepaymentSummary::new(self.principal, self.annual_rate, self.term_years)
    }

    pub fn schedule(&self) -> Vec<ScheduleRow> {
        amortization_schedule(self.principal, self.annual_rate, self.term_years)
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RepaymentSummary {
    pub monthly_payment: f64,
    pub total_interest: f64,
    pub total_paid: f64,
}

impl RepaymentSummary {
    pub fn new(principal: f64, annual_rate: f64, term_years: u32) -> Self {
        Self {
            monthly_payment: monthly_payment(principal, annual_rate, term_years),
            total_interest: total_interest(principal, annual_rate, term_years),
            total_paid: total_paid(principal, annual_rate, term_years),
        }
    }
}

/// One month of an amortization schedule.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleRow {
    pub period: u64,
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    pub balance: f64,
}

impl ScheduleRow {
    pub fn new(period: u64, payment: f64, interest: f64, principal: f64, balance: f64) -> Self {
        Self {
            period,
            payment,
            interest,
            principal,
            balance,
        }
    }
}

impl fmt::Display for ScheduleRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pmt number {}, payment ${:.4}, interest paid ${:.4}, principal paid ${:.4}, ending balance ${:.4}",
            self.period, self.payment, self.interest, self.principal, self.balance
        )
    }
}

fn monthly_rate(annual_rate: f64) -> f64 {
    annual_rate / 12. / 100.
}

fn payment_count(term_years: u32) -> u64 {
    u64::from(term_years) * 12
}

/// Fixed monthly payment that fully repays `principal` over `term_years`.
///
/// `annual_rate` is a percentage. A rate of zero divides zero by zero and
/// yields NaN; callers must pass a positive rate.
pub fn monthly_payment(principal: f64, annual_rate: f64, term_years: u32) -> f64 {
    let rate = monthly_rate(annual_rate);
    let total_pmts = payment_count(term_years) as f64;

    principal * rate / (1. - (1. + rate).powf(-total_pmts))
}

pub fn total_paid(principal: f64, annual_rate: f64, term_years: u32) -> f64 {
    monthly_payment(principal, annual_rate, term_years) * payment_count(term_years) as f64
}

pub fn total_interest(principal: f64, annual_rate: f64, term_years: u32) -> f64 {
    total_paid(principal, annual_rate, term_years) - principal
}

/// Collects the full schedule, one row per month.
pub fn amortization_schedule(
    principal: f64,
    annual_rate: f64,
    term_years: u32,
) -> Vec<ScheduleRow> {
    Amortization::new(principal, annual_rate, term_years).collect()
}

/// Lazily walks the balance of a loan month by month.
///
/// The payment is computed once up front and held fixed, so the balance
/// after the last period carries the accumulated floating point error
/// (typically well under a cent) instead of landing on exactly zero.
#[derive(Clone, Debug)]
pub struct Amortization {
    payment: f64,
    rate: f64,
    balance: f64,
    period: u64,
    total_pmts: u64,
}

impl Amortization {
    pub fn new(principal: f64, annual_rate: f64, term_years: u32) -> Self {
        Self {
            payment: monthly_payment(principal, annual_rate, term_years),
            rate: monthly_rate(annual_rate),
            balance: principal,
            period: 0,
            total_pmts: payment_count(term_years),
        }
    }
}

impl Iterator for Amortization {
    type Item = ScheduleRow;

    fn next(&mut self) -> Option<ScheduleRow> {
        if self.period >= self.total_pmts {
            return None;
        }
        self.period += 1;

        let interest = self.balance * self.rate;
        let principal = self.payment - interest;
        self.balance -= principal;

        let row = ScheduleRow::new(self.period, self.payment, interest, principal, self.balance);
        trace!("{}", row);
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.total_pmts - self.period).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Amortization {}

impl FusedIterator for Amortization {}
