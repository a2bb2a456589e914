//! Monthly salary report.

use std::collections::BTreeMap;

use chrono::Datelike;

use crate::error::EngineResult;
use crate::models::{Event, MonthlySalaryReport, SALARY};

use super::Tally;

/// Sums salary events per calendar month.
///
/// Groups are keyed by upper-case month name (`"JANUARY"`), so salaries
/// from the same month of different years share a row. Rows come out in
/// calendar order. The count is the number of salary records, not the
/// number of distinct employees.
///
/// # Errors
///
/// Returns `AmountOverflow` when a month's total leaves the decimal range.
///
/// # Examples
///
/// ```
/// use payroll_engine::ingest::parse_line;
/// use payroll_engine::reports::monthly_salary_report;
/// use rust_decimal::Decimal;
///
/// let events = vec![
///     parse_line("1,100,John,Doe,Engineer,SALARY,5000,01-01-2021,Jan").unwrap(),
///     parse_line("2,100,John,Doe,Engineer,BONUS,500,15-01-2021,Bonus").unwrap(),
/// ];
/// let report = monthly_salary_report(&events).unwrap();
///
/// assert_eq!(report.len(), 1);
/// assert_eq!(report[0].month, "JANUARY");
/// assert_eq!(report[0].total_salary, Decimal::new(5000, 0));
/// ```
pub fn monthly_salary_report(events: &[Event]) -> EngineResult<Vec<MonthlySalaryReport>> {
    let mut months: BTreeMap<u32, (String, Tally)> = BTreeMap::new();

    for event in events.iter().filter(|e| e.is_type(SALARY)) {
        let (month, tally) = months
            .entry(event.event_date.month())
            .or_insert_with(|| (event.month_name(), Tally::default()));
        tally.add(month, event.value)?;
    }

    Ok(months
        .into_values()
        .map(|(month, tally)| MonthlySalaryReport {
            month,
            total_salary: tally.total,
            record_count: tally.count,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::reports::fixtures::{event, scenario};
    use rust_decimal::Decimal;

    fn row(month: &str, total: i64, count: usize) -> MonthlySalaryReport {
        MonthlySalaryReport {
            month: month.to_string(),
            total_salary: Decimal::new(total, 0),
            record_count: count,
        }
    }

    #[test]
    fn test_scenario_report() {
        assert_eq!(
            monthly_salary_report(&scenario()).unwrap(),
            vec![row("JANUARY", 5000, 1), row("FEBRUARY", 6000, 1)]
        );
    }

    #[test]
    fn test_empty_history_yields_no_rows() {
        assert!(monthly_salary_report(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_count_is_records_not_employees() {
        let events = vec![
            event("1", "100", ("John", "Doe"), "SALARY", 5000, (1, 3, 2021)),
            event("2", "100", ("John", "Doe"), "SALARY", 100, (20, 3, 2021)),
        ];
        assert_eq!(
            monthly_salary_report(&events).unwrap(),
            vec![row("MARCH", 5100, 2)]
        );
    }

    #[test]
    fn test_same_month_of_different_years_share_a_row() {
        let events = vec![
            event("1", "100", ("John", "Doe"), "SALARY", 5000, (1, 12, 2020)),
            event("2", "101", ("Jane", "Smith"), "SALARY", 6000, (1, 12, 2021)),
        ];
        assert_eq!(
            monthly_salary_report(&events).unwrap(),
            vec![row("DECEMBER", 11000, 2)]
        );
    }

    #[test]
    fn test_rows_follow_calendar_order() {
        let events = vec![
            event("1", "100", ("John", "Doe"), "SALARY", 1, (1, 11, 2021)),
            event("2", "100", ("John", "Doe"), "SALARY", 2, (1, 4, 2021)),
            event("3", "100", ("John", "Doe"), "SALARY", 3, (1, 8, 2021)),
        ];
        let months: Vec<String> = monthly_salary_report(&events)
            .unwrap()
            .into_iter()
            .map(|r| r.month)
            .collect();
        assert_eq!(months, vec!["APRIL", "AUGUST", "NOVEMBER"]);
    }

    #[test]
    fn test_non_salary_events_are_ignored() {
        let events = vec![
            event("1", "100", ("John", "Doe"), "BONUS", 500, (1, 1, 2021)),
            event("2", "100", ("John", "Doe"), "salary", 500, (1, 1, 2021)),
        ];
        assert!(monthly_salary_report(&events).unwrap().is_empty());
    }

    #[test]
    fn test_total_out_of_range_is_an_error() {
        let mut events = vec![
            event("1", "100", ("John", "Doe"), "SALARY", 0, (1, 1, 2021)),
            event("2", "101", ("Jane", "Smith"), "SALARY", 0, (2, 1, 2021)),
        ];
        for e in &mut events {
            e.value = Decimal::MAX;
        }

        let result = monthly_salary_report(&events);

        assert!(matches!(
            result,
            Err(EngineError::AmountOverflow { ref group }) if group == "JANUARY"
        ));
    }
}
