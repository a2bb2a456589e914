//! Line parser for payroll uploads.
//!
//! This module converts one raw comma-separated line into a validated
//! [`Event`] or a [`ParseRejection`]. The split is naive: commas inside
//! values are not supported, and only the notes field has its own quote
//! stripping rule.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::ParseRejection;
use crate::models::Event;

/// Lines starting with this token are column headers.
pub const HEADER_TOKEN: &str = "SequenceNo";

/// Number of ordinal fields in a data line.
pub const FIELD_COUNT: usize = 9;

/// `chrono` pattern for the `dd-MM-yyyy` event date.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Parses one raw input line into an event.
///
/// Every field is trimmed before validation. Fields beyond the ninth are
/// ignored. Rejections other than header lines are logged.
///
/// # Examples
///
/// ```
/// use payroll_engine::ingest::parse_line;
/// use rust_decimal::Decimal;
///
/// let event = parse_line(r#"1,100,John,Doe,Engineer,SALARY,5000,01-01-2021,"Jan salary""#)
///     .unwrap();
/// assert_eq!(event.emp_id, "100");
/// assert_eq!(event.value, Decimal::new(5000, 0));
/// assert_eq!(event.notes, "Jan salary");
///
/// assert!(parse_line("SequenceNo,EmpId,FirstName").is_err());
/// ```
pub fn parse_line(raw: &str) -> Result<Event, ParseRejection> {
    if raw.starts_with(HEADER_TOKEN) {
        debug!(line = %raw, "Skipping header line");
        return Err(ParseRejection::Header);
    }

    parse_fields(raw).inspect_err(|rejection| {
        warn!(line = %raw, reason = %rejection, "Rejected payroll line");
    })
}

fn parse_fields(raw: &str) -> Result<Event, ParseRejection> {
    let fields: Vec<&str> = raw.split(',').map(str::trim).collect();
    if fields.len() < FIELD_COUNT {
        return Err(ParseRejection::IncompleteLine {
            found: fields.len(),
        });
    }
    if fields.len() > FIELD_COUNT {
        debug!(
            extra = fields.len() - FIELD_COUNT,
            "Ignoring fields beyond the notes column"
        );
    }

    let emp_id = fields[1];
    if emp_id.is_empty() {
        return Err(ParseRejection::MissingEmployeeId);
    }

    Ok(Event {
        sequence_no: fields[0].to_string(),
        emp_id: emp_id.to_string(),
        first_name: fields[2].to_string(),
        last_name: fields[3].to_string(),
        designation: fields[4].to_string(),
        event: fields[5].to_string(),
        value: parse_value(fields[6])?,
        event_date: parse_event_date(fields[7])?,
        notes: clean_notes(fields[8]).to_string(),
    })
}

/// Parses a decimal amount, accepting plain and scientific notation.
///
/// The value must be representable exactly: input that would need
/// rounding or lies outside the decimal range is rejected, as are digit
/// separators.
fn parse_value(raw: &str) -> Result<Decimal, ParseRejection> {
    let parsed = if raw.contains('_') {
        None
    } else {
        match raw.split_once(['e', 'E']) {
            Some((mantissa, exponent)) => parse_scientific(mantissa, exponent),
            None => Decimal::from_str_exact(raw).ok(),
        }
    };

    parsed.ok_or_else(|| ParseRejection::InvalidValue {
        value: raw.to_string(),
    })
}

/// Computes `mantissa * 10^exponent` without rounding.
fn parse_scientific(mantissa: &str, exponent: &str) -> Option<Decimal> {
    let mut value = Decimal::from_str_exact(mantissa).ok()?;
    let exponent: i64 = exponent.parse().ok()?;
    if value.is_zero() {
        return Some(Decimal::ZERO);
    }

    let scale = i64::from(value.scale());
    if exponent < 0 || exponent <= scale {
        let target = u32::try_from(scale - exponent).ok()?;
        value.set_scale(target).ok()?;
        return Some(value);
    }

    value.set_scale(0).ok()?;
    for _ in 0..exponent - scale {
        value = value.checked_mul(Decimal::TEN)?;
    }
    Some(value)
}

/// Parses a date that is exactly `dd-MM-yyyy`: two-digit day, two-digit
/// month, four-digit year.
fn parse_event_date(raw: &str) -> Result<NaiveDate, ParseRejection> {
    let invalid = || ParseRejection::InvalidDate {
        value: raw.to_string(),
    };

    let bytes = raw.as_bytes();
    let well_shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            2 | 5 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_shaped {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| invalid())
}

/// Removes one layer of surrounding double quotes.
fn clean_notes(notes: &str) -> &str {
    if notes.len() >= 2 && notes.starts_with('"') && notes.ends_with('"') {
        &notes[1..notes.len() - 1]
    } else {
        notes
    }
}
