use crate::cli::parser::{Cli, Commands, UserAction};
use crate::cli::commands::{open_session, open_store};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::session;
use crate::store::InternshipStore;
use crate::ui::messages::{info, success};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::User { action } = &cli.command else {
        return Ok(());
    };

    match action {
        UserAction::Login { email, name } => {
            let mut store = open_store(cfg);
            let user = session::login(&mut store, email, name.as_deref())?;

            if !cli.test {
                let mut saved = Config::load()?;
                saved.current_user = Some(user.email.clone());
                saved.save()?;
            }

            success(format!("Signed in as {} <{}>", user.name, user.email));
        }

        UserAction::Whoami => {
            let (_, user) = open_session(cfg)?;
            println!("👤 {} <{}> (id {})", user.name, user.email, user.id);
        }

        UserAction::Delete { yes } => {
            if !*yes {
                return Err(AppError::InvalidInput(
                    "deleting an account removes every report; pass --yes to confirm".into(),
                ));
            }

            let (mut store, user) = open_session(cfg)?;
            store.delete_user(&user)?;

            if !cli.test {
                let mut saved = Config::load()?;
                if saved.current_user.as_deref() == Some(user.email.as_str()) {
                    saved.current_user = None;
                    saved.save()?;
                    info("Signed out.");
                }
            }

            success(format!("Deleted user {} and all of their data", user.email));
        }
    }

    Ok(())
}
