use crate::cli::commands::open_session;
use crate::config::Config;
use crate::core::hours::format_hours;
use crate::core::progress::Progress;
use crate::errors::AppResult;
use crate::export::locale::format_date_long;
use crate::store::InternshipStore;
use crate::ui::messages::header;
use crate::utils::colors::{CYAN, GREEN, RESET};
use crate::utils::date::today;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let (mut store, user) = open_session(cfg)?;

    let profile = store.get_profile(&user.id)?.unwrap_or_default();
    let reports = store.get_reports(&user.id)?;
    let p = Progress::compute(&profile, &reports, today());

    header(format!("📊 Internship status for {}", user.email));
    if !profile.start_date.is_empty() || !profile.end_date.is_empty() {
        println!(
            "  Period           : {} - {}",
            format_date_long(&profile.start_date, cfg.language),
            format_date_long(&profile.end_date, cfg.language)
        );
    }
    println!("  Reports          : {}", reports.len());
    println!(
        "  Total hours      : {GREEN}{}{RESET}",
        format_hours(p.total_hours)
    );
    println!("  Total days       : {}", p.total_days);
    println!("  Days completed   : {}", p.days_completed);
    println!("  Days remaining   : {}", p.days_remaining);
    println!("  Progress         : {CYAN}{}%{RESET}", p.percentage);

    Ok(())
}
