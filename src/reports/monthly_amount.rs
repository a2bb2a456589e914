//! Monthly payment amount report.

use std::collections::BTreeMap;

use crate::error::EngineResult;
use crate::models::{Event, MonthlyAmountReport};

use super::Tally;

/// Sums salary, bonus and reimbursement events per two-digit month number.
///
/// Rows come out in calendar order, `"01"` first. Fails with
/// `AmountOverflow` when a month's total leaves the decimal range.
pub fn monthly_amount_report(events: &[Event]) -> EngineResult<Vec<MonthlyAmountReport>> {
    let mut months: BTreeMap<String, Tally> = BTreeMap::new();

    for event in events.iter().filter(|e| e.is_payment()) {
        let month = event.month_number();
        months
            .entry(month.clone())
            .or_default()
            .add(&month, event.value)?;
    }

    Ok(months
        .into_iter()
        .map(|(month, tally)| MonthlyAmountReport {
            month,
            total_amount: tally.total,
            record_count: tally.count,
        })
        .collect())
}
