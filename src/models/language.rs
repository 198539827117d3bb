use crate::errors::{AppError, AppResult};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Output language of reports and exported documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Th,
    En,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Th => "th",
            Language::En => "en",
        }
    }

    /// Parse a language tag from CLI/config input (case-insensitive).
    pub fn from_code(s: &str) -> AppResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "th" | "thai" => Ok(Language::Th),
            "en" | "english" => Ok(Language::En),
            other => Err(AppError::InvalidLanguage(other.to_string())),
        }
    }

    /// Pick the Thai or English variant of a template string.
    pub fn pick<'a>(&self, th: &'a str, en: &'a str) -> &'a str {
        match self {
            Language::Th => th,
            Language::En => en,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
