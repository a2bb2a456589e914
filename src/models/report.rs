//! Report view models.
//!
//! Each report view produces flat value records. They carry no behavior and
//! serialize directly for transport.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Event;

/// Salary totals for one calendar month, keyed by month name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySalaryReport {
    /// Upper-case month name, e.g. `"JANUARY"`.
    pub month: String,
    /// Sum of salary values paid in the month.
    pub total_salary: Decimal,
    /// Number of salary records in the month (not distinct employees).
    pub record_count: usize,
}

/// One row of the yearly financial report; one per stored event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyFinancialEntry {
    /// Event type tag.
    pub event: String,
    /// Employee identifier.
    pub emp_id: String,
    /// Date of the event.
    pub event_date: NaiveDate,
    /// Value of the event.
    pub event_value: Decimal,
}

/// Total paid to one employee across salary, bonus and reimbursement events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeFinancialReport {
    /// Employee identifier.
    pub emp_id: String,
    /// First name, taken from the employee's first stored event.
    pub first_name: String,
    /// Last name, taken from the employee's first stored event.
    pub last_name: String,
    /// Sum of payment event values.
    pub total_amount_paid: Decimal,
}

/// Payment totals for one calendar month, keyed by two-digit month number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyAmountReport {
    /// Two-digit month number, `"01"` to `"12"`.
    pub month: String,
    /// Sum of payment values in the month.
    pub total_amount: Decimal,
    /// Number of payment records in the month.
    pub record_count: usize,
}

/// Events of one type grouped by two-digit month number.
pub type EventsByMonth = BTreeMap<String, Vec<Event>>;
