//! Hour aggregation over reports and entries.
//! Pure functions: no I/O, no shared state.

use crate::models::{Entry, Report};

/// Sum of the hours of every entry; empty or non-numeric values count as 0.
pub fn report_total(entries: &[Entry]) -> f64 {
    entries.iter().map(Entry::hours_value).sum()
}

/// Sum of `total_hours` of every report placed before `target_id`.
///
/// `reports` must already be in sequence order. Returns 0 when the target is
/// the first report or is not in the list.
pub fn previous_total_hours(reports: &[Report], target_id: &str) -> f64 {
    match reports.iter().position(|r| r.id == target_id) {
        Some(idx) => reports[..idx].iter().map(|r| r.total_hours).sum(),
        None => 0.0,
    }
}

/// Sum of all cached report totals (dashboard figure).
pub fn grand_total(reports: &[Report]) -> f64 {
    reports.iter().map(|r| r.total_hours).sum()
}

/// Render an hour amount the way it appears in documents: `8`, `11.5`.
pub fn format_hours(hours: f64) -> String {
    if hours == hours.trunc() && hours.abs() < 1e15 {
        format!("{}", hours as i64)
    } else {
        format!("{}", hours)
    }
}
