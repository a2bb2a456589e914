//! Distinct employee count.

use std::collections::HashSet;

use crate::models::Event;

/// Counts distinct employee ids across all events, whatever their type.
pub fn count_total_employees(events: &[Event]) -> usize {
    events
        .iter()
        .map(|event| event.emp_id.as_str())
        .collect::<HashSet<_>>()
        .len()
}
