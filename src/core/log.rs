use crate::db::log::{LogRow, load_log};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RED, RESET, YELLOW};
use unicode_width::UnicodeWidthStr;

/// Widest operation column before truncation.
const MAX_OP_WIDTH: usize = 60;

/// ANSI color for an operation name.
fn color_for_operation(op: &str) -> &'static str {
    match op {
        "user_add" | "init" => GREEN,
        "user_del" => RED,
        "profile" => CYAN,
        "reports" => YELLOW,
        _ => GREY,
    }
}

fn op_target(row: &LogRow) -> String {
    if row.target.is_empty() {
        row.operation.clone()
    } else {
        format!("{} ({})", row.operation, row.target)
    }
}

fn truncate(s: &str, max: usize) -> String {
    if UnicodeWidthStr::width(s) <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

/// Format the internal log as plain lines (no colors).
pub fn format_log(rows: &[LogRow]) -> Vec<String> {
    let id_w = rows.iter().map(|r| r.id.to_string().len()).max().unwrap_or(1);
    let date_w = rows.iter().map(|r| r.date.len()).max().unwrap_or(10);
    let op_w = rows
        .iter()
        .map(|r| UnicodeWidthStr::width(op_target(r).as_str()))
        .max()
        .unwrap_or(10)
        .min(MAX_OP_WIDTH);

    rows.iter()
        .map(|r| {
            let date = chrono::DateTime::parse_from_rfc3339(&r.date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or_else(|_| r.date.clone());
            let op = truncate(&op_target(r), MAX_OP_WIDTH);
            let pad = " ".repeat(op_w.saturating_sub(UnicodeWidthStr::width(op.as_str())));

            format!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                r.id, date, op, pad, r.message
            )
        })
        .collect()
}

/// `format_log` with the operation word colored.
pub fn colored_log(rows: &[LogRow]) -> Vec<String> {
    rows.iter()
        .zip(format_log(rows))
        .map(|(row, line)| {
            line.replacen(
                &row.operation,
                &format!("{}{}{}", color_for_operation(&row.operation), row.operation, RESET),
                1,
            )
        })
        .collect()
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let rows = load_log(&pool.conn)?;

        println!("📜 Internal log:\n");
        for line in colored_log(&rows) {
            println!("{line}");
        }

        Ok(())
    }
}
