mod common;
use common::{
    TEST_USER, as_user, font_fixture, ilog, init_db_with_data, init_db_with_user, setup_test_db,
    temp_out_dir,
};
use predicates::prelude::*;
use predicates::str::contains;
use std::fs;

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("init_creates_database");

    ilog()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(std::path::Path::new(&db_path).exists());
}

#[test]
fn test_commands_require_a_session() {
    let db_path = setup_test_db("commands_require_session");
    ilog()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    ilog()
        .args(["--db", &db_path, "--test", "report", "list"])
        .assert()
        .failure()
        .stderr(contains("No current user"));
}

#[test]
fn test_login_rejects_invalid_email() {
    let db_path = setup_test_db("login_invalid_email");

    ilog()
        .args(["--db", &db_path, "--test", "user", "login", "--email", "not-an-email"])
        .assert()
        .failure()
        .stderr(contains("Invalid email"));
}

#[test]
fn test_login_and_whoami() {
    let db_path = setup_test_db("login_and_whoami");
    init_db_with_user(&db_path);

    as_user(&db_path, &["user", "whoami"])
        .assert()
        .success()
        .stdout(contains(TEST_USER));
}

#[test]
fn test_report_list_shows_totals() {
    let db_path = setup_test_db("report_list_totals");
    init_db_with_data(&db_path);

    as_user(&db_path, &["report", "list"])
        .assert()
        .success()
        .stdout(contains("11.5"));
}

#[test]
fn test_entry_add_continues_dates() {
    let db_path = setup_test_db("entry_add_continues_dates");
    init_db_with_data(&db_path);

    // 1-1 is dated 2024-06-03, so 1-2 lands on the next day
    as_user(&db_path, &["report", "show", "1"])
        .assert()
        .success()
        .stdout(contains("1-2"))
        .stdout(contains("2024-06-04"));
}

#[test]
fn test_entry_add_rejects_bad_date() {
    let db_path = setup_test_db("entry_add_bad_date");
    init_db_with_data(&db_path);

    as_user(&db_path, &["entry", "add", "1", "--date", "06/03/2024"])
        .assert()
        .failure()
        .stderr(contains("Invalid date"));
}

#[test]
fn test_entry_delete_updates_total() {
    let db_path = setup_test_db("entry_delete_updates_total");
    init_db_with_data(&db_path);

    as_user(&db_path, &["entry", "del", "1", "1-2"])
        .assert()
        .success();

    as_user(&db_path, &["report", "show", "1"])
        .assert()
        .success()
        .stdout(contains("Total hours: 8"));
}

#[test]
fn test_report_delete_unknown_fails() {
    let db_path = setup_test_db("report_delete_unknown");
    init_db_with_data(&db_path);

    as_user(&db_path, &["report", "delete", "42"])
        .assert()
        .failure()
        .stderr(contains("Not found"));
}

#[test]
fn test_status_reports_hours_and_days() {
    let db_path = setup_test_db("status_hours_days");
    init_db_with_data(&db_path);

    as_user(&db_path, &["status"])
        .assert()
        .success()
        .stdout(contains("Total hours"))
        .stdout(contains("11.5"))
        .stdout(contains("Total days       : 53"));
}

#[test]
fn test_export_english_pdf() {
    let db_path = setup_test_db("export_english_pdf");
    init_db_with_data(&db_path);
    let out = temp_out_dir("export_english_pdf");

    as_user(
        &db_path,
        &[
            "export",
            "1",
            "--format",
            "pdf",
            "--lang",
            "en",
            "--out",
            &out.to_string_lossy(),
        ],
    )
    .assert()
    .success()
    .stdout(contains("PDF export completed"));

    let bytes = fs::read(out.join("Internship_Report_1.pdf")).expect("read exported pdf");
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_export_thai_docx() {
    let db_path = setup_test_db("export_thai_docx");
    init_db_with_data(&db_path);
    let out = temp_out_dir("export_thai_docx");

    as_user(
        &db_path,
        &[
            "export",
            "1",
            "--format",
            "docx",
            "--lang",
            "th",
            "--out",
            &out.to_string_lossy(),
        ],
    )
    .assert()
    .success();

    let bytes = fs::read(out.join("รายงานฝึกงาน_ฉบับที่_1.docx")).expect("read exported docx");
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn test_export_thai_pdf_without_font_fails() {
    let db_path = setup_test_db("export_thai_pdf_no_font");
    init_db_with_data(&db_path);
    let out = temp_out_dir("export_thai_pdf_no_font");

    as_user(
        &db_path,
        &["export", "1", "--lang", "th", "--out", &out.to_string_lossy()],
    )
    .assert()
    .failure()
    .stderr(contains("Font load failure"));

    // nothing is left behind
    assert_eq!(fs::read_dir(&out).expect("read out dir").count(), 0);
}

#[test]
fn test_export_thai_pdf_with_font() {
    let db_path = setup_test_db("export_thai_pdf_font");
    init_db_with_data(&db_path);
    let out = temp_out_dir("export_thai_pdf_font");
    let font = font_fixture("InternlogThai.ttf");

    as_user(
        &db_path,
        &[
            "export",
            "1",
            "--lang",
            "th",
            "--font",
            &font.to_string_lossy(),
            "--out",
            &out.to_string_lossy(),
        ],
    )
    .assert()
    .success()
    .stdout(contains("PDF export completed"))
    .stderr(contains("ICU4X").not());

    let bytes = fs::read(out.join("รายงานฝึกงาน_ฉบับที่_1.pdf")).expect("read exported pdf");
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_export_thai_pdf_with_latin_font_fails() {
    let db_path = setup_test_db("export_thai_pdf_latin_font");
    init_db_with_data(&db_path);
    let out = temp_out_dir("export_thai_pdf_latin_font");
    let font = font_fixture("InternlogLatin.ttf");

    as_user(
        &db_path,
        &[
            "export",
            "1",
            "--lang",
            "th",
            "--font",
            &font.to_string_lossy(),
            "--out",
            &out.to_string_lossy(),
        ],
    )
    .assert()
    .failure()
    .stderr(contains("has no glyph for"));

    assert_eq!(fs::read_dir(&out).expect("read out dir").count(), 0);
}

#[test]
fn test_export_missing_report_fails() {
    let db_path = setup_test_db("export_missing_report");
    init_db_with_data(&db_path);
    let out = temp_out_dir("export_missing_report");

    as_user(
        &db_path,
        &["export", "9", "--format", "docx", "--out", &out.to_string_lossy()],
    )
    .assert()
    .failure()
    .stderr(contains("Invalid input"));
}

#[test]
fn test_log_print_lists_operations() {
    let db_path = setup_test_db("log_print_operations");
    init_db_with_data(&db_path);

    ilog()
        .args(["--db", &db_path, "--test", "log", "--print"])
        .assert()
        .success()
        .stdout(contains("init"))
        .stdout(contains("reports"));
}

#[test]
fn test_user_delete_requires_confirmation() {
    let db_path = setup_test_db("user_delete_confirmation");
    init_db_with_data(&db_path);

    as_user(&db_path, &["user", "delete"])
        .assert()
        .failure()
        .stderr(contains("--yes"));

    as_user(&db_path, &["user", "delete", "--yes"])
        .assert()
        .success();

    as_user(&db_path, &["report", "list"])
        .assert()
        .failure()
        .stderr(contains("Not found"));
}
