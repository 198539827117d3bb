//! Unified application error type.
//! All modules (db, store, core, export, cli) return AppError to keep the
//! error handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Persistence
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Cache error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid language: {0} (use 'th' or 'en')")]
    InvalidLanguage(String),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    // ---------------------------
    // Session
    // ---------------------------
    #[error("No current user: run `internlog user login` or pass --user")]
    NoSession,

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Font load failure: {0}")]
    FontLoad(String),

    #[error("Serialization failure: {0}")]
    Serialization(String),
}

/// Coarse classification of the export failures surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    FontLoadFailure,
    SerializationFailure,
    Io,
    Other,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::InvalidInput(_) | AppError::NotFound(_) => ErrorKind::InvalidInput,
            AppError::FontLoad(_) => ErrorKind::FontLoadFailure,
            AppError::Serialization(_) => ErrorKind::SerializationFailure,
            AppError::Io(_) => ErrorKind::Io,
            _ => ErrorKind::Other,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
