use crate::cli::commands::open_session;
use crate::cli::parser::{Commands, ReportAction};
use crate::config::Config;
use crate::core::hours::{format_hours, report_total};
use crate::core::report::ReportLogic;
use crate::errors::AppResult;
use crate::ui::messages::{header, info, success};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Report { action } = cmd else {
        return Ok(());
    };

    let (mut store, user) = open_session(cfg)?;
    let mut logic = ReportLogic::new(&mut store, &user);

    match action {
        ReportAction::Add => {
            let id = logic.add_report()?;
            success(format!("Report {id} created"));
        }

        ReportAction::List => {
            let reports = logic.list()?;
            if reports.is_empty() {
                info("No reports yet. Create one with `internlog report add`.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::new("Report", 6),
                Column::new("Entries", 7),
                Column::new("Hours", 5),
            ]);
            for r in &reports {
                table.add_row(vec![
                    r.id.clone(),
                    r.entries.len().to_string(),
                    format_hours(r.total_hours),
                ]);
            }
            print!("{}", table.render());
        }

        ReportAction::Show { id } => {
            let report = logic.get(id)?;

            header(format!("📋 Report {}", report.id));
            let mut table = Table::new(vec![
                Column::new("Entry", 5),
                Column::new("Date", 10),
                Column::new("Hours", 5),
                Column::new("Description", 11),
            ]);
            for e in &report.entries {
                table.add_row(vec![
                    e.id.clone(),
                    e.date.clone(),
                    e.hours.clone(),
                    e.description.clone(),
                ]);
            }
            print!("{}", table.render());
            println!("\nTotal hours: {}", format_hours(report_total(&report.entries)));
        }

        ReportAction::Delete { id } => {
            let removed = logic.delete_report(id)?;
            success(format!(
                "Deleted report {} ({} entries)",
                removed.id,
                removed.entries.len()
            ));
        }
    }

    Ok(())
}
