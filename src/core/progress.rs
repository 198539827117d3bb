//! Internship progress figures shown by `internlog status`.

use crate::core::hours::grand_total;
use crate::models::{Profile, Report};
use crate::utils::date::parse_iso_date;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    pub total_days: i64,
    pub days_completed: i64,
    pub days_remaining: i64,
    pub percentage: i64,
    pub total_hours: f64,
}

impl Progress {
    /// Compute progress at `today`. Missing or invalid dates yield zero days.
    pub fn compute(profile: &Profile, reports: &[Report], today: NaiveDate) -> Self {
        let start = parse_iso_date(&profile.start_date);
        let end = parse_iso_date(&profile.end_date);

        let total_days = match (start, end) {
            (Some(s), Some(e)) => (e - s).num_days().max(0),
            _ => 0,
        };

        let days_completed = match start {
            Some(s) => {
                let current = match end {
                    Some(e) if e < today => e,
                    _ => today,
                };
                (current - s).num_days().max(0)
            }
            None => 0,
        };

        let days_remaining = (total_days - days_completed).max(0);

        let percentage = if total_days > 0 {
            ((days_completed as f64 / total_days as f64) * 100.0).round() as i64
        } else {
            0
        };

        Self {
            total_days,
            days_completed,
            days_remaining,
            percentage,
            total_hours: grand_total(reports),
        }
    }
}
