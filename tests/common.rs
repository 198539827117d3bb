#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use internlog::models::{Entry, Profile, Report};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const TEST_USER: &str = "intern@example.com";

pub fn ilog() -> Command {
    cargo_bin_cmd!("internlog")
}

/// Create a unique test DB path inside the system temp dir and remove any
/// existing file (and its cache directory).
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_internlog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    fs::remove_dir_all(format!("{db_path}.cache")).ok();
    db_path
}

/// Create an empty output directory inside the temp dir.
pub fn temp_out_dir(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create output dir");
    path
}

/// Run `internlog --db <db> --test --user <TEST_USER> <args>`.
/// TrueType fixture under `tests/fixtures`.
pub fn font_fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn as_user(db_path: &str, args: &[&str]) -> Command {
    let mut cmd = ilog();
    cmd.args(["--db", db_path, "--test", "--user", TEST_USER]);
    cmd.args(args);
    cmd
}

/// Initialize the DB and sign in the test user.
pub fn init_db_with_user(db_path: &str) {
    ilog()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    ilog()
        .args([
            "--db", db_path, "--test", "user", "login", "--email", TEST_USER, "--name", "Intern",
        ])
        .assert()
        .success();
}

/// Initialize DB, user, an English-friendly profile and one report with
/// two entries (8 + 3.5 hours).
pub fn init_db_with_data(db_path: &str) {
    init_db_with_user(db_path);

    as_user(
        db_path,
        &[
            "profile",
            "set",
            "--first-name",
            "Jane",
            "--last-name",
            "Doe",
            "--student-id",
            "6531234521",
            "--company",
            "Acme Co.",
            "--supervisor",
            "John Smith",
            "--supervisor-position",
            "Engineer",
            "--department",
            "Computer Engineering",
            "--start",
            "2024-06-03",
            "--end",
            "2024-07-26",
        ],
    )
    .assert()
    .success();

    as_user(db_path, &["report", "add"]).assert().success();
    as_user(
        db_path,
        &[
            "entry", "edit", "1", "1-1", "--date", "2024-06-03", "--hours", "8", "--desc",
            "Onboarding",
        ],
    )
    .assert()
    .success();
    as_user(
        db_path,
        &["entry", "add", "1", "--hours", "3.5", "--desc", "Code review"],
    )
    .assert()
    .success();
}

pub fn sample_profile() -> Profile {
    Profile {
        first_name: "Jane".into(),
        last_name: "Doe".into(),
        student_id: "6531234521".into(),
        company_name: "Acme Co.".into(),
        position: "Intern".into(),
        start_date: "2024-06-03".into(),
        end_date: "2024-07-26".into(),
        supervisor_name: "John Smith".into(),
        supervisor_position: "Engineer".into(),
        department: "Computer Engineering".into(),
    }
}

pub fn sample_report(id: &str, hours: &[&str]) -> Report {
    let entries = hours
        .iter()
        .enumerate()
        .map(|(i, h)| {
            Entry::new(
                format!("{id}-{}", i + 1),
                format!("2024-06-{:02}", i + 3),
                *h,
                format!("Task {}", i + 1),
            )
        })
        .collect();
    Report::new(id, entries)
}
