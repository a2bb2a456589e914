//! Per-employee financial report.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{EmployeeFinancialReport, Event};

use super::checked_sum;

/// Sums salary, bonus and reimbursement values per employee.
///
/// Every employee with at least one event gets a row, even when none of
/// their events is a payment. Names come from the employee's first event.
/// Rows follow the order in which employees first appear.
///
/// # Errors
///
/// Returns `AmountOverflow` when an employee's total leaves the decimal
/// range.
pub fn employee_financial_report(events: &[Event]) -> EngineResult<Vec<EmployeeFinancialReport>> {
    let mut rows: Vec<EmployeeFinancialReport> = Vec::new();
    let mut index_by_employee: HashMap<&str, usize> = HashMap::new();

    for event in events {
        let index = *index_by_employee
            .entry(event.emp_id.as_str())
            .or_insert_with(|| {
                rows.push(EmployeeFinancialReport {
                    emp_id: event.emp_id.clone(),
                    first_name: event.first_name.clone(),
                    last_name: event.last_name.clone(),
                    total_amount_paid: Decimal::ZERO,
                });
                rows.len() - 1
            });

        if event.is_payment() {
            let row = &mut rows[index];
            row.total_amount_paid = checked_sum(row.total_amount_paid, event.value, &row.emp_id)?;
        }
    }

    Ok(rows)
}
