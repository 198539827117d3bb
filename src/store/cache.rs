use super::InternshipStore;
use crate::errors::{AppError, AppResult};
use crate::models::report::sort_reports;
use crate::models::{Profile, Report, User};
use crate::ui::messages::warning;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Per-user snapshot kept on disk next to the database.
#[derive(Debug, Default, Serialize, Deserialize)]
struct CacheFile {
    #[serde(default)]
    profile: Option<Profile>,
    #[serde(default)]
    reports: Vec<Report>,
}

/// Store decorator that mirrors every write into a local JSON cache and
/// serves reads from it whenever the primary store fails.
///
/// When the primary store is absent (database could not be opened) the
/// cache is the only source of data.
pub struct CachedStore<S> {
    primary: Option<S>,
    cache_dir: PathBuf,
}

impl<S: InternshipStore> CachedStore<S> {
    pub fn new(primary: S, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            primary: Some(primary),
            cache_dir: cache_dir.into(),
        }
    }

    pub fn offline(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            primary: None,
            cache_dir: cache_dir.into(),
        }
    }

    fn user_file(&self, user_id: &str) -> PathBuf {
        let safe: String = user_id
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        self.cache_dir.join(format!("user_{safe}.json"))
    }

    fn users_file(&self) -> PathBuf {
        self.cache_dir.join("users.json")
    }

    fn read_cache(&self, user_id: &str) -> AppResult<CacheFile> {
        read_json_or_default(&self.user_file(user_id))
    }

    fn write_cache(&self, user_id: &str, cache: &CacheFile) -> AppResult<()> {
        write_json(&self.user_file(user_id), cache)
    }

    fn remember_user(&self, user: &User) {
        let result = read_json_or_default::<Vec<User>>(&self.users_file()).and_then(|mut users| {
            users.retain(|u| u.email != user.email);
            users.push(user.clone());
            write_json(&self.users_file(), &users)
        });

        if let Err(e) = result {
            warning(format!("Failed to update local user cache: {e}"));
        }
    }

    fn cached_user(&self, email: &str) -> AppResult<Option<User>> {
        let users: Vec<User> = read_json_or_default(&self.users_file())?;
        Ok(users.into_iter().find(|u| u.email == email))
    }
}

impl<S: InternshipStore> InternshipStore for CachedStore<S> {
    fn find_user(&mut self, email: &str) -> AppResult<Option<User>> {
        if let Some(primary) = self.primary.as_mut() {
            match primary.find_user(email) {
                Ok(Some(user)) => {
                    self.remember_user(&user);
                    return Ok(Some(user));
                }
                Ok(None) => return Ok(None),
                Err(e) => warning(format!("Store unavailable ({e}), using local cache")),
            }
        }
        self.cached_user(email)
    }

    fn ensure_user(&mut self, name: &str, email: &str) -> AppResult<User> {
        if let Some(primary) = self.primary.as_mut() {
            match primary.ensure_user(name, email) {
                Ok(user) => {
                    self.remember_user(&user);
                    return Ok(user);
                }
                Err(e) => warning(format!("Store unavailable ({e}), using local cache")),
            }
        }

        self.cached_user(email)?.ok_or_else(|| {
            AppError::NotFound(format!("user '{email}' is not available offline"))
        })
    }

    fn get_profile(&mut self, user_id: &str) -> AppResult<Option<Profile>> {
        if let Some(primary) = self.primary.as_mut() {
            match primary.get_profile(user_id) {
                Ok(Some(profile)) => return Ok(Some(profile)),
                Ok(None) => {}
                Err(e) => warning(format!("Store unavailable ({e}), using local cache")),
            }
        }
        Ok(self.read_cache(user_id)?.profile)
    }

    fn put_profile(&mut self, user_id: &str, profile: &Profile) -> AppResult<()> {
        let primary_result = match self.primary.as_mut() {
            Some(primary) => primary.put_profile(user_id, profile),
            None => Err(AppError::NotFound("database".into())),
        };

        let mut cache = self.read_cache(user_id)?;
        cache.profile = Some(profile.clone());
        self.write_cache(user_id, &cache)?;

        if let Err(e) = primary_result {
            warning(format!("Profile saved to local cache only: {e}"));
        }
        Ok(())
    }

    fn get_reports(&mut self, user_id: &str) -> AppResult<Vec<Report>> {
        if let Some(primary) = self.primary.as_mut() {
            match primary.get_reports(user_id) {
                Ok(reports) => return Ok(reports),
                Err(e) => warning(format!("Store unavailable ({e}), using local cache")),
            }
        }

        let mut reports = self.read_cache(user_id)?.reports;
        sort_reports(&mut reports);
        Ok(reports)
    }

    fn put_reports(&mut self, user_id: &str, reports: &[Report]) -> AppResult<()> {
        let primary_result = match self.primary.as_mut() {
            Some(primary) => primary.put_reports(user_id, reports),
            None => Err(AppError::NotFound("database".into())),
        };

        let mut cache = self.read_cache(user_id)?;
        cache.reports = reports.to_vec();
        sort_reports(&mut cache.reports);
        self.write_cache(user_id, &cache)?;

        if let Err(e) = primary_result {
            warning(format!("Reports saved to local cache only: {e}"));
        }
        Ok(())
    }

    fn delete_user(&mut self, user: &User) -> AppResult<()> {
        if let Some(primary) = self.primary.as_mut() {
            primary.delete_user(user)?;
        }

        let file = self.user_file(&user.id);
        if file.exists() {
            fs::remove_file(&file)?;
        }

        let mut users: Vec<User> = read_json_or_default(&self.users_file())?;
        users.retain(|u| u.email != user.email);
        write_json(&self.users_file(), &users)?;
        Ok(())
    }
}

fn read_json_or_default<T>(path: &Path) -> AppResult<T>
where
    T: for<'de> Deserialize<'de> + Default,
{
    if !path.exists() {
        return Ok(T::default());
    }
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}
