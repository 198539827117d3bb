use crate::errors::{AppError, AppResult};
use crate::models::report::sort_reports;
use crate::models::{Entry, Report, User};
use crate::store::InternshipStore;
use crate::utils::date::{add_days_iso, parse_iso_date};

/// Hours given to a new entry when none are supplied.
pub const DEFAULT_ENTRY_HOURS: &str = "8";

/// Partial update of an entry; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct EntryPatch {
    pub date: Option<String>,
    pub hours: Option<String>,
    pub description: Option<String>,
}

impl EntryPatch {
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.hours.is_none() && self.description.is_none()
    }
}

// ---------------------------
// In-memory edits
// ---------------------------

/// Id for the next report: highest numeric id + 1, `1` for the first.
pub fn next_report_id(reports: &[Report]) -> String {
    let max = reports.iter().filter_map(Report::sequence).max().unwrap_or(0);
    (max + 1).to_string()
}

/// Id for the next entry of `report`: `{report}-{n}` with n past the highest
/// suffix in use.
pub fn next_entry_id(report: &Report) -> String {
    let max = report
        .entries
        .iter()
        .filter_map(Entry::sequence)
        .max()
        .unwrap_or(0);
    format!("{}-{}", report.id, max + 1)
}

fn find_report<'a>(reports: &'a mut [Report], report_id: &str) -> AppResult<&'a mut Report> {
    reports
        .iter_mut()
        .find(|r| r.id == report_id)
        .ok_or_else(|| AppError::NotFound(format!("report '{report_id}'")))
}

/// Append a new report holding one blank entry; returns its id.
pub fn add_report(reports: &mut Vec<Report>) -> String {
    let id = next_report_id(reports);
    let entry = Entry::new(format!("{id}-1"), "", "", "");

    reports.push(Report::new(id.clone(), vec![entry]));
    sort_reports(reports);
    id
}

pub fn delete_report(reports: &mut Vec<Report>, report_id: &str) -> AppResult<Report> {
    let idx = reports
        .iter()
        .position(|r| r.id == report_id)
        .ok_or_else(|| AppError::NotFound(format!("report '{report_id}'")))?;
    Ok(reports.remove(idx))
}

/// Append an entry to a report; returns the new entry.
///
/// Without an explicit date, the day after the last dated entry is used.
pub fn add_entry(
    reports: &mut [Report],
    report_id: &str,
    date: Option<String>,
    hours: Option<String>,
    description: Option<String>,
) -> AppResult<Entry> {
    let report = find_report(reports, report_id)?;

    let date = match date {
        Some(d) => d,
        None => report
            .entries
            .last()
            .filter(|e| parse_iso_date(&e.date).is_some())
            .and_then(|e| add_days_iso(&e.date, 1))
            .unwrap_or_default(),
    };

    let entry = Entry::new(
        next_entry_id(report),
        date,
        hours.unwrap_or_else(|| DEFAULT_ENTRY_HOURS.to_string()),
        description.unwrap_or_default(),
    );

    report.entries.push(entry.clone());
    report.recompute_total();
    Ok(entry)
}

pub fn update_entry(
    reports: &mut [Report],
    report_id: &str,
    entry_id: &str,
    patch: &EntryPatch,
) -> AppResult<Entry> {
    let report = find_report(reports, report_id)?;
    let entry = report
        .entry_mut(entry_id)
        .ok_or_else(|| AppError::NotFound(format!("entry '{entry_id}' in report '{report_id}'")))?;

    if let Some(d) = &patch.date {
        entry.date = d.clone();
    }
    if let Some(h) = &patch.hours {
        entry.hours = h.clone();
    }
    if let Some(desc) = &patch.description {
        entry.description = desc.clone();
    }

    let updated = entry.clone();
    report.recompute_total();
    Ok(updated)
}

pub fn delete_entry(reports: &mut [Report], report_id: &str, entry_id: &str) -> AppResult<Entry> {
    let report = find_report(reports, report_id)?;
    let idx = report
        .entries
        .iter()
        .position(|e| e.id == entry_id)
        .ok_or_else(|| AppError::NotFound(format!("entry '{entry_id}' in report '{report_id}'")))?;

    let removed = report.entries.remove(idx);
    report.recompute_total();
    Ok(removed)
}

// ---------------------------
// Store-backed operations
// ---------------------------

/// Report editing for one user. Every change loads the full set, edits it
/// and writes the full set back.
pub struct ReportLogic<'a, S: InternshipStore> {
    store: &'a mut S,
    user: &'a User,
}

impl<'a, S: InternshipStore> ReportLogic<'a, S> {
    pub fn new(store: &'a mut S, user: &'a User) -> Self {
        Self { store, user }
    }

    pub fn list(&mut self) -> AppResult<Vec<Report>> {
        self.store.get_reports(&self.user.id)
    }

    pub fn get(&mut self, report_id: &str) -> AppResult<Report> {
        self.list()?
            .into_iter()
            .find(|r| r.id == report_id)
            .ok_or_else(|| AppError::NotFound(format!("report '{report_id}'")))
    }

    fn edit<T>(&mut self, f: impl FnOnce(&mut Vec<Report>) -> AppResult<T>) -> AppResult<T> {
        let mut reports = self.store.get_reports(&self.user.id)?;
        let out = f(&mut reports)?;
        sort_reports(&mut reports);
        self.store.put_reports(&self.user.id, &reports)?;
        Ok(out)
    }

    pub fn add_report(&mut self) -> AppResult<String> {
        self.edit(|reports| Ok(add_report(reports)))
    }

    pub fn delete_report(&mut self, report_id: &str) -> AppResult<Report> {
        self.edit(|reports| delete_report(reports, report_id))
    }

    pub fn add_entry(
        &mut self,
        report_id: &str,
        date: Option<String>,
        hours: Option<String>,
        description: Option<String>,
    ) -> AppResult<Entry> {
        self.edit(|reports| add_entry(reports, report_id, date, hours, description))
    }

    pub fn update_entry(
        &mut self,
        report_id: &str,
        entry_id: &str,
        patch: &EntryPatch,
    ) -> AppResult<Entry> {
        self.edit(|reports| update_entry(reports, report_id, entry_id, patch))
    }

    pub fn delete_entry(&mut self, report_id: &str, entry_id: &str) -> AppResult<Entry> {
        self.edit(|reports| delete_entry(reports, report_id, entry_id))
    }
}
