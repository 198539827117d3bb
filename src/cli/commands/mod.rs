pub mod config;
pub mod entry;
pub mod export;
pub mod init;
pub mod log;
pub mod profile;
pub mod report;
pub mod status;
pub mod user;

use crate::config::Config;
use crate::errors::AppResult;
use crate::models::User;
use crate::session;
use crate::store::{self, AppStore};

/// Open the store for the configured database.
pub(crate) fn open_store(cfg: &Config) -> AppStore {
    store::open(&cfg.database_path().to_string_lossy(), cfg.cache_path())
}

/// Open the store and resolve the acting user.
pub(crate) fn open_session(cfg: &Config) -> AppResult<(AppStore, User)> {
    let mut store = open_store(cfg);
    let user = session::resolve(&mut store, None, cfg.current_user.as_deref())?;
    Ok((store, user))
}
