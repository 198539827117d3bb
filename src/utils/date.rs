use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parse the ISO date shapes accepted in entries and profiles:
/// `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS]` and full RFC 3339 timestamps.
pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}

/// ISO date `days` after `s`, or `None` when `s` is not a date.
pub fn add_days_iso(s: &str, days: i64) -> Option<String> {
    let d = parse_iso_date(s)?;
    let next = d.checked_add_signed(Duration::days(days))?;
    Some(next.format("%Y-%m-%d").to_string())
}
