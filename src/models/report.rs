use super::entry::Entry;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A bi-weekly report: an ordered list of entries plus the cached total.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    #[serde(default)]
    pub entries: Vec<Entry>,
    #[serde(default)]
    pub total_hours: f64,
}

impl Report {
    pub fn new(id: impl Into<String>, entries: Vec<Entry>) -> Self {
        let mut report = Self {
            id: id.into(),
            entries,
            total_hours: 0.0,
        };
        report.recompute_total();
        report
    }

    /// Refresh the cached `total_hours` from the entries.
    pub fn recompute_total(&mut self) {
        self.total_hours = crate::core::hours::report_total(&self.entries);
    }

    pub fn entry(&self, entry_id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == entry_id)
    }

    pub fn entry_mut(&mut self, entry_id: &str) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| e.id == entry_id)
    }

    /// Numeric value of the id, when it is a plain sequence number.
    pub fn sequence(&self) -> Option<u64> {
        self.id.trim().parse().ok()
    }
}

/// Order report ids as sequence numbers ("2" < "10"); non-numeric ids sort
/// after numeric ones, lexicographically.
pub fn compare_ids(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<u64>(), b.trim().parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Stable sort of reports into sequence order.
pub fn sort_reports(reports: &mut [Report]) {
    reports.sort_by(|a, b| compare_ids(&a.id, &b.id));
}
