mod common;
use common::{sample_profile, sample_report};
use internlog::core::log::{colored_log, format_log};
use internlog::core::progress::Progress;
use internlog::core::report::{self, EntryPatch, ReportLogic};
use internlog::errors::{AppError, AppResult};
use internlog::models::{Profile, Report, User};
use internlog::db::log::LogRow;
use internlog::session;
use internlog::utils::colors::{GREEN, RED, RESET};
use internlog::store::{CachedStore, InternshipStore, SqliteStore};
use chrono::NaiveDate;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Store whose backend is always down.
struct FailingStore;

fn down<T>() -> AppResult<T> {
    Err(AppError::Io(std::io::Error::other("backend unavailable")))
}

impl InternshipStore for FailingStore {
    fn find_user(&mut self, _email: &str) -> AppResult<Option<User>> {
        down()
    }
    fn ensure_user(&mut self, _name: &str, _email: &str) -> AppResult<User> {
        down()
    }
    fn get_profile(&mut self, _user_id: &str) -> AppResult<Option<Profile>> {
        down()
    }
    fn put_profile(&mut self, _user_id: &str, _profile: &Profile) -> AppResult<()> {
        down()
    }
    fn get_reports(&mut self, _user_id: &str) -> AppResult<Vec<Report>> {
        down()
    }
    fn put_reports(&mut self, _user_id: &str, _reports: &[Report]) -> AppResult<()> {
        down()
    }
    fn delete_user(&mut self, _user: &User) -> AppResult<()> {
        down()
    }
}

fn cache_dir(name: &str) -> PathBuf {
    let mut path = env::temp_dir();
    path.push(format!("{name}_internlog_cache"));
    fs::remove_dir_all(&path).ok();
    path
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn test_first_sign_in_creates_empty_profile() {
    let mut store = SqliteStore::in_memory().unwrap();
    let user = session::login(&mut store, "a@example.com", None).unwrap();

    assert_eq!(user.name, "a");
    let profile = store.get_profile(&user.id).unwrap().unwrap();
    assert_eq!(profile, Profile::default());
    assert!(store.get_reports(&user.id).unwrap().is_empty());

    // signing in again returns the same account
    let again = session::login(&mut store, "a@example.com", Some("Other")).unwrap();
    assert_eq!(again.id, user.id);
}

#[test]
fn test_resolve_prefers_requested_user() {
    let mut store = SqliteStore::in_memory().unwrap();
    session::login(&mut store, "a@example.com", None).unwrap();
    session::login(&mut store, "b@example.com", None).unwrap();

    let user = session::resolve(&mut store, Some("b@example.com"), Some("a@example.com")).unwrap();
    assert_eq!(user.email, "b@example.com");

    let err = session::resolve(&mut store, None, None).unwrap_err();
    assert!(matches!(err, AppError::NoSession));
}

#[test]
fn test_reports_round_trip_in_sequence_order() {
    let mut store = SqliteStore::in_memory().unwrap();
    let user = store.ensure_user("Jane", "jane@example.com").unwrap();

    let reports = vec![
        sample_report("10", &["8"]),
        sample_report("2", &["4", "4"]),
        sample_report("1", &["8", "8"]),
    ];
    store.put_reports(&user.id, &reports).unwrap();

    let loaded = store.get_reports(&user.id).unwrap();
    let ids: Vec<&str> = loaded.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "10"]);
    assert_eq!(loaded[1].entries.len(), 2);
    assert_eq!(loaded[0].total_hours, 16.0);
}

#[test]
fn test_delete_user_removes_everything() {
    let mut store = SqliteStore::in_memory().unwrap();
    let user = store.ensure_user("Jane", "jane@example.com").unwrap();
    store.put_profile(&user.id, &sample_profile()).unwrap();
    store
        .put_reports(&user.id, &[sample_report("1", &["8"])])
        .unwrap();

    store.delete_user(&user).unwrap();

    assert!(store.find_user("jane@example.com").unwrap().is_none());
    assert!(store.get_profile(&user.id).unwrap().is_none());
    assert!(store.get_reports(&user.id).unwrap().is_empty());
}

#[test]
fn test_report_editing_flow() {
    let mut store = SqliteStore::in_memory().unwrap();
    let user = store.ensure_user("Jane", "jane@example.com").unwrap();
    let mut logic = ReportLogic::new(&mut store, &user);

    assert_eq!(logic.add_report().unwrap(), "1");
    assert_eq!(logic.add_report().unwrap(), "2");

    let patch = EntryPatch {
        date: Some("2024-06-03".into()),
        hours: Some("6".into()),
        description: Some("Setup".into()),
    };
    logic.update_entry("1", "1-1", &patch).unwrap();

    let added = logic.add_entry("1", None, None, Some("Review".into())).unwrap();
    assert_eq!(added.id, "1-2");
    assert_eq!(added.date, "2024-06-04");
    assert_eq!(added.hours, "8");

    assert_eq!(logic.get("1").unwrap().total_hours, 14.0);

    logic.delete_entry("1", "1-1").unwrap();
    assert_eq!(logic.get("1").unwrap().total_hours, 8.0);

    logic.delete_report("2").unwrap();
    let ids: Vec<String> = logic.list().unwrap().into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec!["1"]);
}

#[test]
fn test_next_ids_skip_past_gaps() {
    let mut reports = vec![sample_report("1", &["8"]), sample_report("3", &["8", "8"])];
    assert_eq!(report::add_report(&mut reports), "4");

    // entry ids continue after the highest suffix even after a deletion
    report::delete_entry(&mut reports, "3", "3-1").unwrap();
    let entry = report::add_entry(&mut reports, "3", None, Some("2".into()), None).unwrap();
    assert_eq!(entry.id, "3-3");
}

#[test]
fn test_add_entry_without_previous_date_leaves_date_empty() {
    let mut reports = Vec::new();
    let id = report::add_report(&mut reports);

    let entry = report::add_entry(&mut reports, &id, None, None, None).unwrap();
    assert_eq!(entry.date, "");
    assert_eq!(reports[0].total_hours, 8.0);
}

#[test]
fn test_editing_unknown_ids_fails() {
    let mut reports = vec![sample_report("1", &["8"])];

    assert!(report::delete_report(&mut reports, "9").is_err());
    assert!(report::delete_entry(&mut reports, "1", "1-9").is_err());
    assert!(report::update_entry(&mut reports, "2", "2-1", &EntryPatch::default()).is_err());
}

#[test]
fn test_cache_serves_reads_when_primary_fails() {
    let dir = cache_dir("cache_serves_reads");

    let user = {
        let mut online = CachedStore::new(SqliteStore::in_memory().unwrap(), &dir);
        let user = online.ensure_user("Jane", "jane@example.com").unwrap();
        online.put_profile(&user.id, &sample_profile()).unwrap();
        online
            .put_reports(&user.id, &[sample_report("2", &["8"]), sample_report("1", &["4"])])
            .unwrap();
        user
    };

    let mut broken = CachedStore::new(FailingStore, &dir);
    assert_eq!(
        broken.find_user("jane@example.com").unwrap().map(|u| u.id),
        Some(user.id.clone())
    );
    assert_eq!(broken.get_profile(&user.id).unwrap(), Some(sample_profile()));

    let reports = broken.get_reports(&user.id).unwrap();
    let ids: Vec<&str> = reports.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);
}

#[test]
fn test_cache_takes_writes_when_primary_fails() {
    let dir = cache_dir("cache_takes_writes");

    let mut broken = CachedStore::new(FailingStore, &dir);
    broken
        .put_reports("7", &[sample_report("1", &["8", "8"])])
        .unwrap();

    let mut offline: CachedStore<SqliteStore> = CachedStore::offline(&dir);
    let reports = offline.get_reports("7").unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].total_hours, 16.0);
}

#[test]
fn test_progress_figures() {
    let profile = sample_profile();
    let reports = vec![sample_report("1", &["8", "8"]), sample_report("2", &["4"])];

    let mid = Progress::compute(&profile, &reports, date("2024-06-29"));
    assert_eq!(mid.total_days, 53);
    assert_eq!(mid.days_completed, 26);
    assert_eq!(mid.days_remaining, 27);
    assert_eq!(mid.percentage, 49);
    assert_eq!(mid.total_hours, 20.0);

    let after = Progress::compute(&profile, &reports, date("2025-01-01"));
    assert_eq!(after.days_completed, 53);
    assert_eq!(after.days_remaining, 0);
    assert_eq!(after.percentage, 100);

    let empty = Progress::compute(&Profile::default(), &[], date("2024-06-29"));
    assert_eq!(empty.total_days, 0);
    assert_eq!(empty.percentage, 0);
}

#[test]
fn test_log_lines_color_the_operation() {
    let rows = vec![
        LogRow {
            id: 1,
            date: "2024-06-03T08:00:00+07:00".into(),
            operation: "init".into(),
            target: String::new(),
            message: "database created".into(),
        },
        LogRow {
            id: 2,
            date: "2024-06-04T08:00:00+07:00".into(),
            operation: "user_del".into(),
            target: "jane@example.com".into(),
            message: "account removed".into(),
        },
    ];

    let plain = format_log(&rows);
    assert!(plain[1].contains("user_del (jane@example.com) => account removed"));

    let colored = colored_log(&rows);
    assert!(colored[0].contains(&format!("{GREEN}init{RESET}")));
    assert!(colored[1].contains(&format!("{RED}user_del{RESET}")));
}
