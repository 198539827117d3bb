use super::InternshipStore;
use crate::db::initialize::init_db;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::models::{Profile, Report, User};
use crate::ui::messages::warning;

/// SQLite-backed store.
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    /// Open (and bootstrap) the database at `path`.
    pub fn open(path: &str) -> AppResult<Self> {
        Self::from_pool(DbPool::new(path)?)
    }

    pub fn in_memory() -> AppResult<Self> {
        Self::from_pool(DbPool::in_memory()?)
    }

    fn from_pool(pool: DbPool) -> AppResult<Self> {
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    /// Audit logging never blocks the operation it describes.
    fn audit(&self, operation: &str, target: &str, message: &str) {
        if let Err(e) = ttlog(&self.pool.conn, operation, target, message) {
            warning(format!("Failed to write internal log: {e}"));
        }
    }
}

impl InternshipStore for SqliteStore {
    fn find_user(&mut self, email: &str) -> AppResult<Option<User>> {
        queries::find_user_by_email(&self.pool.conn, email)
    }

    fn ensure_user(&mut self, name: &str, email: &str) -> AppResult<User> {
        if let Some(user) = queries::find_user_by_email(&self.pool.conn, email)? {
            return Ok(user);
        }

        let user = queries::insert_user(&self.pool.conn, name, email)?;
        queries::upsert_profile(&self.pool.conn, &user.id, &Profile::default())?;
        self.audit("user_add", email, "User created with empty profile");
        Ok(user)
    }

    fn get_profile(&mut self, user_id: &str) -> AppResult<Option<Profile>> {
        queries::load_profile(&self.pool.conn, user_id)
    }

    fn put_profile(&mut self, user_id: &str, profile: &Profile) -> AppResult<()> {
        queries::upsert_profile(&self.pool.conn, user_id, profile)?;
        self.audit("profile", user_id, "Profile saved");
        Ok(())
    }

    fn get_reports(&mut self, user_id: &str) -> AppResult<Vec<Report>> {
        queries::load_reports(&self.pool.conn, user_id)
    }

    fn put_reports(&mut self, user_id: &str, reports: &[Report]) -> AppResult<()> {
        queries::replace_reports(&mut self.pool.conn, user_id, reports)?;
        self.audit(
            "reports",
            user_id,
            &format!("Saved {} report(s)", reports.len()),
        );
        Ok(())
    }

    fn delete_user(&mut self, user: &User) -> AppResult<()> {
        queries::delete_reports(&self.pool.conn, &user.id)?;
        queries::delete_profile(&self.pool.conn, &user.id)?;
        queries::delete_user(&self.pool.conn, &user.id)?;
        self.audit("user_del", &user.email, "Account and all data deleted");
        Ok(())
    }
}
