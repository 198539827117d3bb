//! Resolution of the acting user.
//!
//! The user is passed explicitly to every operation; it comes from the
//! `--user` flag or, failing that, the `current_user` of the configuration.

use crate::errors::{AppError, AppResult};
use crate::models::User;
use crate::store::InternshipStore;
use regex::Regex;

pub fn validate_email(email: &str) -> AppResult<()> {
    let re = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
        .map_err(|e| AppError::InvalidInput(e.to_string()))?;

    if re.is_match(email.trim()) {
        Ok(())
    } else {
        Err(AppError::InvalidEmail(email.to_string()))
    }
}

/// Name used when signing in without one: the local part of the email.
pub fn default_name(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}

/// Sign in `email`, creating the account on first use.
pub fn login<S: InternshipStore>(store: &mut S, email: &str, name: Option<&str>) -> AppResult<User> {
    validate_email(email)?;
    let email = email.trim();
    let name = name
        .map(str::to_string)
        .unwrap_or_else(|| default_name(email));
    store.ensure_user(&name, email)
}

/// Find the acting user: `requested` wins over `current`.
pub fn resolve<S: InternshipStore>(
    store: &mut S,
    requested: Option<&str>,
    current: Option<&str>,
) -> AppResult<User> {
    let email = requested.or(current).ok_or(AppError::NoSession)?;
    validate_email(email)?;

    store.find_user(email.trim())?.ok_or_else(|| {
        AppError::NotFound(format!(
            "user '{email}' (sign in with `internlog user login --email {email}`)"
        ))
    })
}
