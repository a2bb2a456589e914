//! Payroll event model.
//!
//! This module defines the [`Event`] struct, the only record the engine
//! persists, along with the event type tags the report views understand.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Salary payment event type.
pub const SALARY: &str = "SALARY";
/// Bonus payment event type.
pub const BONUS: &str = "BONUS";
/// Expense reimbursement event type.
pub const REIMBURSEMENT: &str = "REIMBURSEMENT";
/// Employee onboarding event type.
pub const ONBOARD: &str = "ONBOARD";
/// Employee exit event type.
pub const EXIT: &str = "EXIT";

/// Event types that represent money paid to an employee.
pub const PAYMENT_EVENT_TYPES: [&str; 3] = [SALARY, BONUS, REIMBURSEMENT];

/// A single payroll occurrence for one employee on one date.
///
/// Events are created by the line parser, stored once and never mutated.
/// The serialized field names are the persisted store format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Opaque sequence identifier taken from the source file.
    pub sequence_no: String,
    /// Employee identifier. Never empty.
    pub emp_id: String,
    /// Employee first name.
    pub first_name: String,
    /// Employee last name.
    pub last_name: String,
    /// Employee designation (job title).
    pub designation: String,
    /// Event type tag, e.g. `SALARY` or `ONBOARD`. Other tags are kept as-is.
    pub event: String,
    /// Amount associated with the event.
    pub value: Decimal,
    /// Calendar date of the event.
    pub event_date: NaiveDate,
    /// Free-text notes, with one layer of surrounding quotes removed.
    pub notes: String,
}

impl Event {
    /// Returns true if this event's type tag equals `event_type` exactly.
    pub fn is_type(&self, event_type: &str) -> bool {
        self.event == event_type
    }

    /// Returns true for salary, bonus and reimbursement events.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::Event;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let event = Event {
    ///     sequence_no: "2".to_string(),
    ///     emp_id: "100".to_string(),
    ///     first_name: "John".to_string(),
    ///     last_name: "Doe".to_string(),
    ///     designation: "Engineer".to_string(),
    ///     event: "BONUS".to_string(),
    ///     value: Decimal::new(500, 0),
    ///     event_date: NaiveDate::from_ymd_opt(2021, 1, 15).unwrap(),
    ///     notes: "Bonus".to_string(),
    /// };
    /// assert!(event.is_payment());
    /// ```
    pub fn is_payment(&self) -> bool {
        PAYMENT_EVENT_TYPES.contains(&self.event.as_str())
    }

    /// Two-digit month number of the event date, `"01"` to `"12"`.
    pub fn month_number(&self) -> String {
        format!("{:02}", self.event_date.month())
    }

    /// Upper-case English month name of the event date, e.g. `"JANUARY"`.
    pub fn month_name(&self) -> String {
        self.event_date.format("%B").to_string().to_uppercase()
    }
}
