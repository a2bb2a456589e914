//! Events of one type grouped by month.

use crate::models::{Event, EventsByMonth};

/// Groups events whose type equals `event_type` exactly by two-digit month
/// number. Each group holds the full event records in store order.
///
/// # Examples
///
/// ```
/// use payroll_engine::ingest::parse_line;
/// use payroll_engine::reports::events_by_month;
///
/// let events = vec![
///     parse_line("1,200,Ann,Lee,Analyst,ONBOARD,0,01-03-2021,Joined").unwrap(),
///     parse_line("2,200,Ann,Lee,Analyst,EXIT,0,30-06-2021,Left").unwrap(),
/// ];
/// let joins = events_by_month(&events, "ONBOARD");
///
/// assert_eq!(joins.len(), 1);
/// assert_eq!(joins["03"][0].emp_id, "200");
/// ```
pub fn events_by_month(events: &[Event], event_type: &str) -> EventsByMonth {
    let mut months = EventsByMonth::new();

    for event in events.iter().filter(|e| e.is_type(event_type)) {
        months
            .entry(event.month_number())
            .or_default()
            .push(event.clone());
    }

    months
}
