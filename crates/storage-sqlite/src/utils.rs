//! Column conversion helpers.
//!
//! Amounts are stored as TEXT so no precision is lost, and timestamps as
//! RFC3339 strings in UTC. Reads are tolerant: a malformed value is logged
//! and replaced instead of failing the whole query.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses a stored decimal, falling back to `f64` parsing for values written
/// in scientific notation and to zero when nothing works.
pub fn parse_decimal(value: &str, field_name: &str) -> Decimal {
    match Decimal::from_str(value) {
        Ok(d) => d,
        Err(e_decimal) => match f64::from_str(value).ok().and_then(Decimal::from_f64) {
            Some(d) => d,
            None => {
                log::error!(
                    "Failed to parse {} '{}' as Decimal (err: {}). Falling back to ZERO.",
                    field_name,
                    value,
                    e_decimal
                );
                Decimal::ZERO
            }
        },
    }
}

pub fn format_decimal(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Parses a stored RFC3339 timestamp. Unparseable values become the Unix epoch
/// so the row still loads and sorts last.
pub fn parse_timestamp(value: &str, field_name: &str) -> DateTime<Utc> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(dt) => dt.with_timezone(&Utc),
        Err(e) => {
            log::error!(
                "Failed to parse {} '{}' as RFC3339 (err: {}). Falling back to epoch.",
                field_name,
                value,
                e
            );
            DateTime::<Utc>::UNIX_EPOCH
        }
    }
}

/// Fixed-width UTC format so lexical order in SQLite matches time order.
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn parse_date(value: &str, field_name: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(d) => Some(d),
        Err(e) => {
            log::warn!("Ignoring invalid {} '{}': {}", field_name, value, e);
            None
        }
    }
}

pub fn format_date(value: &NaiveDate) -> String {
    value.format("%Y-%m-%d").to_string()
}
