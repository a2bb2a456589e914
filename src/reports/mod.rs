//! Report views over the stored event history.
//!
//! Every view is a pure function of the full event collection, computed at
//! query time. Month-keyed views are deliberately asymmetric: the salary
//! view keys by month name, while the amount and by-type views key by
//! two-digit month number.

mod employee_financial;
mod events_by_month;
mod monthly_amount;
mod monthly_salary;
mod total_employees;
mod yearly_financial;

pub use employee_financial::employee_financial_report;
pub use events_by_month::events_by_month;
pub use monthly_amount::monthly_amount_report;
pub use monthly_salary::monthly_salary_report;
pub use total_employees::count_total_employees;
pub use yearly_financial::yearly_financial_report;

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

/// Running sum and record count for one group.
#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    total: Decimal,
    count: usize,
}

impl Tally {
    fn add(&mut self, group: &str, value: Decimal) -> EngineResult<()> {
        self.total = checked_sum(self.total, value, group)?;
        self.count += 1;
        Ok(())
    }
}

/// Adds two amounts, failing instead of panicking when the sum leaves the
/// decimal range.
fn checked_sum(total: Decimal, value: Decimal, group: &str) -> EngineResult<Decimal> {
    total
        .checked_add(value)
        .ok_or_else(|| EngineError::AmountOverflow {
            group: group.to_string(),
        })
}
