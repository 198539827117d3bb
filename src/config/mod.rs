use crate::errors::{AppError, AppResult};
use crate::models::Language;
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

const APP_DIR: &str = ".internlog";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    /// Default export language (`th`/`thai`, `en`/`english`).
    #[serde(default, deserialize_with = "deserialize_language")]
    pub language: Language,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// TrueType font embedded in PDF exports.
    #[serde(default)]
    pub font_path: Option<String>,
    #[serde(default = "default_cache_dir")]
    pub cache_dir: String,
    /// Email of the signed-in user.
    #[serde(default)]
    pub current_user: Option<String>,
}

fn deserialize_language<'de, D>(deserializer: D) -> Result<Language, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Language::from_code(&raw).map_err(serde::de::Error::custom)
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_cache_dir() -> String {
    Config::config_dir().join("cache").to_string_lossy().to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            language: Language::default(),
            output_dir: default_output_dir(),
            font_path: None,
            cache_dir: default_cache_dir(),
            current_user: None,
        }
    }
}

impl Config {
    /// `~/.internlog` (falls back to the working directory without a home).
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("internlog.conf")
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join("internlog.sqlite")
    }

    /// Load the configuration file, or defaults when it does not exist.
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        serde_yaml::from_str(&content).map_err(|e| {
            AppError::Config(format!("cannot parse '{}': {e}", path.display()))
        })
    }

    pub fn save(&self) -> AppResult<()> {
        fs::create_dir_all(Self::config_dir())?;
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| AppError::Config(format!("cannot serialize configuration: {e}")))?;

        let mut file = fs::File::create(Self::config_file())?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        expand_tilde(&self.database)
    }

    pub fn output_path(&self) -> PathBuf {
        expand_tilde(&self.output_dir)
    }

    pub fn cache_path(&self) -> PathBuf {
        expand_tilde(&self.cache_dir)
    }

    pub fn font_file(&self) -> Option<PathBuf> {
        self.font_path.as_deref().map(expand_tilde)
    }

    /// Create the config directory, the database and (outside test mode)
    /// the configuration file.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let mut config = if is_test {
            Self::default()
        } else {
            Self::load()?
        };

        if let Some(name) = custom_db {
            let p = expand_tilde(&name);
            let path = if p.is_absolute() { p } else { dir.join(p) };
            config.database = path.to_string_lossy().to_string();
        }

        if !is_test {
            config.save()?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        Ok(config)
    }
}
