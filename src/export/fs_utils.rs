// src/export/fs_utils.rs

use crate::errors::{AppError, AppResult};
use crate::export::ExportArtifact;
use crate::ui::messages::{info, warning};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Where rendered artifacts end up.
pub trait ExportSink {
    /// Persist the artifact and return where it was stored.
    fn save(&mut self, artifact: &ExportArtifact) -> AppResult<PathBuf>;
}

/// Writes artifacts into a directory on disk.
pub struct DirectorySink {
    dir: PathBuf,
    force: bool,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>, force: bool) -> Self {
        Self {
            dir: dir.into(),
            force,
        }
    }
}

impl ExportSink for DirectorySink {
    fn save(&mut self, artifact: &ExportArtifact) -> AppResult<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(&artifact.file_name);

        ensure_writable(&path, self.force)?;
        write_atomic(&path, &artifact.bytes)?;
        Ok(path)
    }
}

/// Keeps artifacts in memory, keyed by file name.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub files: BTreeMap<String, Vec<u8>>,
}

impl ExportSink for MemorySink {
    fn save(&mut self, artifact: &ExportArtifact) -> AppResult<PathBuf> {
        self.files
            .insert(artifact.file_name.clone(), artifact.bytes.clone());
        Ok(PathBuf::from(&artifact.file_name))
    }
}

/// Check whether a file may be created or overwritten.
///
/// - file does not exist → Ok
/// - file exists and `force` is set → Ok
/// - file exists without `force` → ask the user
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    warning(format!("The file '{}' already exists.", path.display()));

    print!("Overwrite? [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer).map_err(AppError::from)?;
    let ans = answer.trim().to_ascii_lowercase();

    if ans == "y" || ans == "yes" {
        info("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(AppError::from(io::Error::other(
            "Export cancelled: existing file not overwritten",
        )))
    }
}

/// Write through a temporary sibling file and rename it into place, so a
/// failed export never leaves a truncated file behind.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> AppResult<()> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| AppError::InvalidInput(format!("invalid path '{}'", path.display())))?;
    let tmp = path.with_file_name(format!(".{file_name}.tmp"));

    let result = fs::write(&tmp, bytes).and_then(|_| fs::rename(&tmp, path));
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result?;
    Ok(())
}
