//! Yearly financial report.

use crate::models::{Event, YearlyFinancialEntry};

/// Projects every event to its type, employee, date and value, in store
/// order. No aggregation takes place.
pub fn yearly_financial_report(events: &[Event]) -> Vec<YearlyFinancialEntry> {
    events
        .iter()
        .map(|event| YearlyFinancialEntry {
            event: event.event.clone(),
            emp_id: event.emp_id.clone(),
            event_date: event.event_date,
            event_value: event.value,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::fixtures::{event, scenario};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    #[test]
    fn test_one_row_per_event_in_store_order() {
        let report = yearly_financial_report(&scenario());

        assert_eq!(report.len(), 3);
        assert_eq!(
            report[1],
            YearlyFinancialEntry {
                event: "BONUS".to_string(),
                emp_id: "100".to_string(),
                event_date: NaiveDate::from_ymd_opt(2021, 1, 15).unwrap(),
                event_value: Decimal::new(500, 0),
            }
        );
        assert_eq!(report[2].emp_id, "101");
    }

    #[test]
    fn test_includes_non_payment_events() {
        let events = vec![event("1", "200", ("Ann", "Lee"), "EXIT", 0, (30, 6, 2021))];
        let report = yearly_financial_report(&events);
        assert_eq!(report[0].event, "EXIT");
    }
}
