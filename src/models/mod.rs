//! Core data models for the Payroll Processing Engine.
//!
//! This module contains the persisted [`Event`] record and the flat value
//! types produced by the report views.

mod event;
mod report;

pub use event::{
    BONUS, EXIT, Event, ONBOARD, PAYMENT_EVENT_TYPES, REIMBURSEMENT, SALARY,
};
pub use report::{
    EmployeeFinancialReport, EventsByMonth, MonthlyAmountReport, MonthlySalaryReport,
    YearlyFinancialEntry,
};
