use crate::errors::AppResult;
use rusqlite::Connection;

/// Current schema version, stored in `PRAGMA user_version`.
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the database.
/// Every statement is idempotent, so this is safe to run on each open.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            email       TEXT NOT NULL UNIQUE,
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS profiles (
            user_id              TEXT PRIMARY KEY,
            first_name           TEXT NOT NULL DEFAULT '',
            last_name            TEXT NOT NULL DEFAULT '',
            student_id           TEXT NOT NULL DEFAULT '',
            company_name         TEXT NOT NULL DEFAULT '',
            position             TEXT NOT NULL DEFAULT '',
            start_date           TEXT NOT NULL DEFAULT '',
            end_date             TEXT NOT NULL DEFAULT '',
            supervisor_name      TEXT NOT NULL DEFAULT '',
            supervisor_position  TEXT NOT NULL DEFAULT '',
            department           TEXT NOT NULL DEFAULT '',
            updated_at           TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS reports (
            user_id      TEXT NOT NULL,
            id           TEXT NOT NULL,
            seq          INTEGER NOT NULL,
            total_hours  REAL NOT NULL DEFAULT 0,
            updated_at   TEXT NOT NULL,
            PRIMARY KEY (user_id, id)
        );

        CREATE TABLE IF NOT EXISTS entries (
            user_id      TEXT NOT NULL,
            report_id    TEXT NOT NULL,
            id           TEXT NOT NULL,
            seq          INTEGER NOT NULL,
            date         TEXT NOT NULL DEFAULT '',
            hours        TEXT NOT NULL DEFAULT '',
            description  TEXT NOT NULL DEFAULT '',
            PRIMARY KEY (user_id, report_id, id),
            FOREIGN KEY (user_id, report_id)
                REFERENCES reports(user_id, id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_entries_report ON entries(user_id, report_id, seq);

        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;

    conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    Ok(())
}
