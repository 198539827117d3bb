//! Persistence contract used by the application logic.
//!
//! Everything is keyed by the user id. `put_reports` has replace-all
//! semantics: the slice passed in becomes the complete set of reports.

mod cache;
mod sqlite;

pub use cache::CachedStore;
pub use sqlite::SqliteStore;

use crate::errors::AppResult;
use crate::models::{Profile, Report, User};

pub trait InternshipStore {
    /// Look up a user by email.
    fn find_user(&mut self, email: &str) -> AppResult<Option<User>>;

    /// Return the user for `email`, creating it together with an empty
    /// profile on first sign-in.
    fn ensure_user(&mut self, name: &str, email: &str) -> AppResult<User>;

    fn get_profile(&mut self, user_id: &str) -> AppResult<Option<Profile>>;

    fn put_profile(&mut self, user_id: &str, profile: &Profile) -> AppResult<()>;

    /// Reports in sequence order.
    fn get_reports(&mut self, user_id: &str) -> AppResult<Vec<Report>>;

    fn put_reports(&mut self, user_id: &str, reports: &[Report]) -> AppResult<()>;

    /// Delete the account and everything it owns.
    fn delete_user(&mut self, user: &User) -> AppResult<()>;
}

/// Store used by the CLI: SQLite mirrored into the JSON cache.
pub type AppStore = CachedStore<SqliteStore>;

/// Open the configured database. When it cannot be opened the cache alone
/// serves reads and takes writes.
pub fn open(database: &str, cache_dir: impl Into<std::path::PathBuf>) -> AppStore {
    match SqliteStore::open(database) {
        Ok(store) => CachedStore::new(store, cache_dir),
        Err(e) => {
            crate::ui::messages::warning(format!(
                "Cannot open database '{database}' ({e}), working from local cache"
            ));
            CachedStore::offline(cache_dir)
        }
    }
}
