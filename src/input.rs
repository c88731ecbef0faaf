use crate::loan::LoanParameters;
use crate::report;
use log::{trace, warn};
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("`{0}` is not a number")]
    NotANumber(String),
    #[error("`{0}` is not a whole number of years")]
    NotAWholeNumber(String),
    #[error("`{0}` must be greater than zero")]
    NotPositive(String),
    #[error("`{0}` is not one of `y`, `n` or an empty line")]
    InvalidAnswer(String),
    #[error("input ended before a value was entered")]
    EndOfInput,
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl InputError {
    /// True for errors that asking again can fix.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, InputError::EndOfInput | InputError::Io(_))
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RepeatAnswer {
    Continue,
    Stop,
}

/// Parses a loan amount or interest rate. Thousands separators are allowed.
pub fn parse_amount(text: &str) -> Result<f64, InputError> {
    let trimmed = text.trim();
    let amount: f64 = trimmed
        .replace(',', "")
        .parse()
        .map_err(|_| InputError::NotANumber(trimmed.to_string()))?;

    // "inf" and "NaN" parse as f64 but are no use as a loan amount
    if !amount.is_finite() {
        return Err(InputError::NotANumber(trimmed.to_string()));
    }
    if amount <= 0. {
        return Err(InputError::NotPositive(trimmed.to_string()));
    }
    Ok(amount)
}

pub fn parse_term(text: &str) -> Result<u32, InputError> {
    let trimmed = text.trim();
    let years: i64 = trimmed
        .parse()
        .map_err(|_| InputError::NotAWholeNumber(trimmed.to_string()))?;

    if years <= 0 {
        return Err(InputError::NotPositive(trimmed.to_string()));
    }
    u32::try_from(years).map_err(|_| InputError::NotAWholeNumber(trimmed.to_string()))
}

/// Only a bare `n` stops; `y` or an empty line continues. Case matters.
pub fn parse_repeat_answer(text: &str) -> Result<RepeatAnswer, InputError> {
    match text {
        "n" => Ok(RepeatAnswer::Stop),
        "y" | "" => Ok(RepeatAnswer::Continue),
        other => Err(InputError::InvalidAnswer(other.to_string())),
    }
}

/// Asks questions on `output` and reads the answers from `input`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Reads one line with its terminator removed. Bytes that are not valid
    /// UTF-8 decode to replacement characters, which no parser accepts.
    fn read_line(&mut self, prompt: &str) -> Result<String, InputError> {
        write!(self.output, "\n{}", prompt)?;
        self.output.flush()?;

        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Err(InputError::EndOfInput);
        }
        let answer = String::from_utf8_lossy(&line)
            .trim_end_matches(['\n', '\r'])
            .to_string();
        trace!("{:?} answered {:?}", prompt, answer);
        Ok(answer)
    }

    /// Repeats `prompt` until `parse` accepts the answer.
    pub fn ask<T>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> Result<T, InputError>,
    ) -> Result<T, InputError> {
        loop {
            let answer = self.read_line(prompt)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() => {
                    warn!("rejected input: {}", e);
                    report::write_invalid_input(&mut self.output)?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    pub fn loan_parameters(&mut self) -> Result<LoanParameters, InputError> {
        let principal = self.ask("Enter the loan amount: ", parse_amount)?;
        let annual_rate = self.ask(
            "Enter the annual interest rate (in percentage): ",
            parse_amount,
        )?;
        let term_years = self.ask("Enter the loan term in years: ", parse_term)?;
        Ok(LoanParameters::new(principal, annual_rate, term_years))
    }

    /// Invalid answers re-ask without the invalid-amount banner.
    pub fn repeat_answer(&mut self) -> Result<RepeatAnswer, InputError> {
        loop {
            let answer = self.read_line("Do you want to do another calculation? (Y or n): ")?;
            match parse_repeat_answer(&answer) {
                Ok(repeat) => return Ok(repeat),
                Err(e) => warn!("rejected input: {}", e),
            }
        }
    }
}
