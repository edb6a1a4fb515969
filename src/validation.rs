//! Pre-flight checks for transaction records.
//!
//! Rules run in a fixed order and stop at the first failure. A field counts as
//! present when it is set and non-empty; for `amount` zero and NaN also count as
//! absent, so `amount = 0` reports a missing field rather than a non-positive one.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::models::TransactionRecord;

/// First rule a record violated
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Amount must be a positive number")]
    NonPositiveAmount,
    #[error("Currency must be a 3-letter code")]
    InvalidCurrency,
    #[error("Timestamp must be a valid date")]
    InvalidTimestamp,
}

struct Rule {
    check: fn(&TransactionRecord) -> bool,
    error: ValidationError,
}

/// Rules in evaluation order
fn rules() -> [Rule; 9] {
    [
        Rule {
            check: |r| present(&r.transaction_id),
            error: ValidationError::MissingField("transaction_id"),
        },
        Rule {
            check: |r| present(&r.user_id),
            error: ValidationError::MissingField("user_id"),
        },
        Rule {
            check: |r| r.amount.is_some_and(|a| a != 0.0 && !a.is_nan()),
            error: ValidationError::MissingField("amount"),
        },
        Rule {
            check: |r| r.amount.is_some_and(|a| a.is_finite() && a > 0.0),
            error: ValidationError::NonPositiveAmount,
        },
        Rule {
            check: |r| present(&r.currency),
            error: ValidationError::MissingField("currency"),
        },
        Rule {
            check: |r| r.currency.as_deref().is_some_and(|c| c.chars().count() == 3),
            error: ValidationError::InvalidCurrency,
        },
        Rule {
            check: |r| present(&r.country),
            error: ValidationError::MissingField("country"),
        },
        Rule {
            check: |r| present(&r.timestamp),
            error: ValidationError::MissingField("timestamp"),
        },
        Rule {
            check: |r| r.timestamp.as_deref().is_some_and(is_valid_timestamp),
            error: ValidationError::InvalidTimestamp,
        },
    ]
}

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Check a record before it is sent
pub fn validate(record: &TransactionRecord) -> Result<(), ValidationError> {
    match rules().into_iter().find(|rule| !(rule.check)(record)) {
        Some(rule) => Err(rule.error),
        None => Ok(()),
    }
}

fn present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|v| !v.is_empty())
}

/// Accepts RFC 3339, RFC 2822, ISO date-times without offset and bare dates
pub fn is_valid_timestamp(raw: &str) -> bool {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw).is_ok()
        || DateTime::parse_from_rfc2822(raw).is_ok()
        || NAIVE_DATETIME_FORMATS
            .iter()
            .any(|format| NaiveDateTime::parse_from_str(raw, format).is_ok())
        || NaiveDate::parse_from_str(raw, "%Y-%m-%d").is_ok()
}
