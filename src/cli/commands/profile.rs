use crate::cli::commands::open_session;
use crate::cli::parser::{Commands, ProfileAction, ProfileArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::Profile;
use crate::models::profile::ProfilePatch;
use crate::store::InternshipStore;
use crate::ui::messages::success;
use crate::utils::colors::colorize_optional;
use crate::utils::date::parse_iso_date;
use crate::utils::table::pad_right;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Profile { action } = cmd else {
        return Ok(());
    };

    let (mut store, user) = open_session(cfg)?;

    match action {
        ProfileAction::Show => {
            let profile = store.get_profile(&user.id)?.unwrap_or_default();
            print_profile(&profile);
        }

        ProfileAction::Set(args) => {
            let patch = to_patch(args)?;
            if patch.is_empty() {
                return Err(AppError::InvalidInput(
                    "nothing to update (see `internlog profile set --help`)".into(),
                ));
            }

            let mut profile = store.get_profile(&user.id)?.unwrap_or_default();
            patch.apply(&mut profile);
            store.put_profile(&user.id, &profile)?;

            success("Profile updated");
        }
    }

    Ok(())
}

fn check_date(value: &Option<String>) -> AppResult<()> {
    match value {
        Some(d) if !d.trim().is_empty() && parse_iso_date(d).is_none() => {
            Err(AppError::InvalidDate(d.clone()))
        }
        _ => Ok(()),
    }
}

fn to_patch(args: &ProfileArgs) -> AppResult<ProfilePatch> {
    check_date(&args.start_date)?;
    check_date(&args.end_date)?;

    Ok(ProfilePatch {
        first_name: args.first_name.clone(),
        last_name: args.last_name.clone(),
        student_id: args.student_id.clone(),
        company_name: args.company_name.clone(),
        position: args.position.clone(),
        start_date: args.start_date.clone(),
        end_date: args.end_date.clone(),
        supervisor_name: args.supervisor_name.clone(),
        supervisor_position: args.supervisor_position.clone(),
        department: args.department.clone(),
    })
}

fn print_profile(p: &Profile) {
    let rows = [
        ("First name", &p.first_name),
        ("Last name", &p.last_name),
        ("Student ID", &p.student_id),
        ("Company", &p.company_name),
        ("Position", &p.position),
        ("Start date", &p.start_date),
        ("End date", &p.end_date),
        ("Supervisor", &p.supervisor_name),
        ("Supervisor position", &p.supervisor_position),
        ("Department", &p.department),
    ];

    println!("🎓 Internship profile:\n");
    for (label, value) in rows {
        println!("  {} : {}", pad_right(label, 19), colorize_optional(value));
    }
}
