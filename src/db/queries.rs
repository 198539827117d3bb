use crate::errors::AppResult;
use crate::models::report::sort_reports;
use crate::models::{Entry, Profile, Report, User};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Row, params};

// ---------------------------
// Users
// ---------------------------

fn map_user(row: &Row) -> rusqlite::Result<User> {
    let id: i64 = row.get("id")?;
    Ok(User {
        id: id.to_string(),
        name: row.get("name")?,
        email: row.get("email")?,
    })
}

pub fn find_user_by_email(conn: &Connection, email: &str) -> AppResult<Option<User>> {
    let user = conn
        .query_row(
            "SELECT id, name, email FROM users WHERE email = ?1",
            [email],
            map_user,
        )
        .optional()?;
    Ok(user)
}

pub fn insert_user(conn: &Connection, name: &str, email: &str) -> AppResult<User> {
    conn.execute(
        "INSERT INTO users (name, email, created_at) VALUES (?1, ?2, ?3)",
        params![name, email, Local::now().to_rfc3339()],
    )?;

    Ok(User {
        id: conn.last_insert_rowid().to_string(),
        name: name.to_string(),
        email: email.to_string(),
    })
}

pub fn delete_user(conn: &Connection, user_id: &str) -> AppResult<()> {
    conn.execute("DELETE FROM users WHERE id = ?1", [user_id])?;
    Ok(())
}

// ---------------------------
// Profiles
// ---------------------------

fn map_profile(row: &Row) -> rusqlite::Result<Profile> {
    Ok(Profile {
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        student_id: row.get("student_id")?,
        company_name: row.get("company_name")?,
        position: row.get("position")?,
        start_date: row.get("start_date")?,
        end_date: row.get("end_date")?,
        supervisor_name: row.get("supervisor_name")?,
        supervisor_position: row.get("supervisor_position")?,
        department: row.get("department")?,
    })
}

pub fn load_profile(conn: &Connection, user_id: &str) -> AppResult<Option<Profile>> {
    let profile = conn
        .query_row(
            "SELECT * FROM profiles WHERE user_id = ?1",
            [user_id],
            map_profile,
        )
        .optional()?;
    Ok(profile)
}

/// Insert or replace the profile of a user.
pub fn upsert_profile(conn: &Connection, user_id: &str, p: &Profile) -> AppResult<()> {
    conn.execute(
        "INSERT INTO profiles (user_id, first_name, last_name, student_id, company_name,
                               position, start_date, end_date, supervisor_name,
                               supervisor_position, department, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
         ON CONFLICT(user_id) DO UPDATE SET
             first_name = excluded.first_name,
             last_name = excluded.last_name,
             student_id = excluded.student_id,
             company_name = excluded.company_name,
             position = excluded.position,
             start_date = excluded.start_date,
             end_date = excluded.end_date,
             supervisor_name = excluded.supervisor_name,
             supervisor_position = excluded.supervisor_position,
             department = excluded.department,
             updated_at = excluded.updated_at",
        params![
            user_id,
            p.first_name,
            p.last_name,
            p.student_id,
            p.company_name,
            p.position,
            p.start_date,
            p.end_date,
            p.supervisor_name,
            p.supervisor_position,
            p.department,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}

pub fn delete_profile(conn: &Connection, user_id: &str) -> AppResult<()> {
    conn.execute("DELETE FROM profiles WHERE user_id = ?1", [user_id])?;
    Ok(())
}

// ---------------------------
// Reports + entries
// ---------------------------

fn map_entry(row: &Row) -> rusqlite::Result<Entry> {
    Ok(Entry {
        id: row.get("id")?,
        date: row.get("date")?,
        hours: row.get("hours")?,
        description: row.get("description")?,
    })
}

/// Load every report of a user with its entries, in sequence order.
pub fn load_reports(conn: &Connection, user_id: &str) -> AppResult<Vec<Report>> {
    let mut stmt = conn.prepare(
        "SELECT id, total_hours FROM reports
         WHERE user_id = ?1
         ORDER BY seq ASC",
    )?;

    let rows = stmt.query_map([user_id], |row| {
        Ok(Report {
            id: row.get(0)?,
            entries: Vec::new(),
            total_hours: row.get(1)?,
        })
    })?;

    let mut reports = Vec::new();
    for r in rows {
        reports.push(r?);
    }

    let mut entry_stmt = conn.prepare(
        "SELECT id, date, hours, description FROM entries
         WHERE user_id = ?1 AND report_id = ?2
         ORDER BY seq ASC",
    )?;

    for report in &mut reports {
        let rows = entry_stmt.query_map(params![user_id, report.id], map_entry)?;
        for r in rows {
            report.entries.push(r?);
        }
    }

    sort_reports(&mut reports);
    Ok(reports)
}

/// Replace every report of a user. Runs inside a single transaction so a
/// failure leaves the previous set untouched.
pub fn replace_reports(conn: &mut Connection, user_id: &str, reports: &[Report]) -> AppResult<()> {
    let mut ordered = reports.to_vec();
    sort_reports(&mut ordered);

    let now = Local::now().to_rfc3339();
    let tx = conn.transaction()?;

    tx.execute("DELETE FROM entries WHERE user_id = ?1", [user_id])?;
    tx.execute("DELETE FROM reports WHERE user_id = ?1", [user_id])?;

    {
        let mut report_stmt = tx.prepare(
            "INSERT INTO reports (user_id, id, seq, total_hours, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        let mut entry_stmt = tx.prepare(
            "INSERT INTO entries (user_id, report_id, id, seq, date, hours, description)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )?;

        for (seq, report) in ordered.iter().enumerate() {
            report_stmt.execute(params![user_id, report.id, seq as i64, report.total_hours, now])?;

            for (eseq, e) in report.entries.iter().enumerate() {
                entry_stmt.execute(params![
                    user_id,
                    report.id,
                    e.id,
                    eseq as i64,
                    e.date,
                    e.hours,
                    e.description
                ])?;
            }
        }
    }

    tx.commit()?;
    Ok(())
}

pub fn delete_reports(conn: &Connection, user_id: &str) -> AppResult<()> {
    conn.execute("DELETE FROM entries WHERE user_id = ?1", [user_id])?;
    conn.execute("DELETE FROM reports WHERE user_id = ?1", [user_id])?;
    Ok(())
}
