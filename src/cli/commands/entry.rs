use crate::cli::commands::open_session;
use crate::cli::parser::{Commands, EntryAction};
use crate::config::Config;
use crate::core::report::{EntryPatch, ReportLogic};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::date::parse_iso_date;

fn check_date(date: &Option<String>) -> AppResult<()> {
    match date {
        Some(d) if !d.trim().is_empty() && parse_iso_date(d).is_none() => {
            Err(AppError::InvalidDate(format!("{d} (expected YYYY-MM-DD)")))
        }
        _ => Ok(()),
    }
}

fn check_hours(hours: &Option<String>) -> AppResult<()> {
    match hours {
        Some(h) if !h.trim().is_empty() => match h.trim().parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => Ok(()),
            _ => Err(AppError::InvalidInput(format!("invalid hours '{h}'"))),
        },
        _ => Ok(()),
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Entry { action } = cmd else {
        return Ok(());
    };

    let (mut store, user) = open_session(cfg)?;
    let mut logic = ReportLogic::new(&mut store, &user);

    match action {
        EntryAction::Add {
            report,
            date,
            hours,
            description,
        } => {
            check_date(date)?;
            check_hours(hours)?;

            let entry = logic.add_entry(report, date.clone(), hours.clone(), description.clone())?;
            success(format!(
                "Entry {} added to report {report} ({} h)",
                entry.id, entry.hours
            ));
        }

        EntryAction::Edit {
            report,
            entry,
            date,
            hours,
            description,
        } => {
            check_date(date)?;
            check_hours(hours)?;

            let patch = EntryPatch {
                date: date.clone(),
                hours: hours.clone(),
                description: description.clone(),
            };
            if patch.is_empty() {
                return Err(AppError::InvalidInput(
                    "nothing to update (use --date, --hours or --desc)".into(),
                ));
            }

            let updated = logic.update_entry(report, entry, &patch)?;
            success(format!("Entry {} updated", updated.id));
        }

        EntryAction::Del { report, entry } => {
            let removed = logic.delete_entry(report, entry)?;
            success(format!("Entry {} deleted from report {report}", removed.id));
        }
    }

    Ok(())
}
