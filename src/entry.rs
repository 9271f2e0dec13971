//! Parsing and validation of user-entered values.
//!
//! The store accepts anything; the positive-amount rule lives here so both
//! the TUI form and the CLI reject bad input before it reaches the database.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum EntryError {
    #[error("Amount must be greater than zero.")]
    NonPositiveAmount,
    #[error("Invalid amount: '{0}'")]
    InvalidAmount(String),
    #[error("Invalid date: '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("Invalid time: '{0}' (expected HH:MM or HH:MM:SS)")]
    InvalidTime(String),
    #[error("Invalid month: '{0}' (expected YYYY-MM)")]
    InvalidMonth(String),
    #[error("Invalid expense id: '{0}' (expected a non-negative integer)")]
    InvalidId(String),
}

/// Parse an amount such as `12.5`, `$1,200.00` or `  7 `. Must be > 0.
pub(crate) fn parse_amount(input: &str) -> Result<Decimal, EntryError> {
    let amount = parse_decimal(input)?;
    if amount <= Decimal::ZERO {
        return Err(EntryError::NonPositiveAmount);
    }
    Ok(amount)
}

/// Parse a minimum-amount filter value. Zero is allowed, negatives are not.
pub(crate) fn parse_min_amount(input: &str) -> Result<Decimal, EntryError> {
    let amount = parse_decimal(input)?;
    if amount < Decimal::ZERO {
        return Err(EntryError::InvalidAmount(input.trim().to_string()));
    }
    Ok(amount)
}

fn parse_decimal(input: &str) -> Result<Decimal, EntryError> {
    let cleaned = input.trim().replace(['$', ','], "");
    if cleaned.is_empty() {
        return Err(EntryError::InvalidAmount(input.trim().to_string()));
    }
    Decimal::from_str(&cleaned).map_err(|_| EntryError::InvalidAmount(input.trim().to_string()))
}

pub(crate) fn parse_date(input: &str) -> Result<NaiveDate, EntryError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| EntryError::InvalidDate(input.trim().to_string()))
}

pub(crate) fn parse_time(input: &str) -> Result<NaiveTime, EntryError> {
    let trimmed = input.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map_err(|_| EntryError::InvalidTime(trimmed.to_string()))
}

/// Combine separate date and time entries into one timestamp.
pub(crate) fn parse_timestamp(date: &str, time: &str) -> Result<NaiveDateTime, EntryError> {
    Ok(parse_date(date)?.and_time(parse_time(time)?))
}

/// Parse `YYYY-MM-DD [HH:MM[:SS]]` as given to the CLI `--at` flag.
/// A bare date means midnight.
pub(crate) fn parse_datetime(input: &str) -> Result<NaiveDateTime, EntryError> {
    let mut parts = input.split_whitespace();
    let date = parts.next().unwrap_or("");
    match parts.next() {
        Some(time) => parse_timestamp(date, time),
        None => Ok(parse_date(date)?.and_time(NaiveTime::default())),
    }
}

/// Validate a `YYYY-MM` month key and return it normalized.
pub(crate) fn parse_month(input: &str) -> Result<String, EntryError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d")
        .map(|d| d.format(crate::models::MONTH_FORMAT).to_string())
        .map_err(|_| EntryError::InvalidMonth(trimmed.to_string()))
}

pub(crate) fn parse_expense_id(input: &str) -> Result<i64, EntryError> {
    let trimmed = input.trim().trim_start_matches('#');
    match trimmed.parse::<i64>() {
        Ok(id) if id >= 0 => Ok(id),
        _ => Err(EntryError::InvalidId(input.trim().to_string())),
    }
}

#[cfg(test)]
#[path = "entry_tests.rs"]
mod entry_tests;
