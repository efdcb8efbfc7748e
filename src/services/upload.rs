//! Image upload storage.
//!
//! Uploaded files live under a configured directory with no database
//! record. Filenames are sanitized before writing and extensions are
//! checked against the configured allow-list.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::UploadConfig;
use crate::{Error, Result};

#[derive(Clone)]
pub struct UploadService {
    dir: PathBuf,
    allowed_extensions: Vec<String>,
    max_file_size: usize,
}

impl UploadService {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            dir: PathBuf::from(&config.dir),
            allowed_extensions: config.allowed_extensions.clone(),
            max_file_size: config.max_file_size,
        }
    }

    /// Create the upload directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// Store an uploaded file and return the filename it was saved under.
    pub async fn store(&self, filename: &str, data: &[u8]) -> Result<String> {
        if !self.is_allowed(filename) {
            return Err(Error::InvalidFileType(format!(
                "only {} files are allowed",
                self.allowed_extensions.join(", ")
            )));
        }

        if data.len() > self.max_file_size {
            return Err(Error::FileTooLarge {
                max_size: self.max_file_size,
            });
        }

        let safe_name = sanitize_filename(filename)?;
        let path = self.dir.join(&safe_name);

        tokio::fs::write(&path, data).await?;
        info!(filename = %safe_name, bytes = data.len(), "stored upload");

        Ok(safe_name)
    }

    /// Filenames currently in the upload directory.
    pub async fn list(&self) -> Result<Vec<String>> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            // Directory not created yet: nothing uploaded
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();

        debug!(count = names.len(), "listed uploads");
        Ok(names)
    }

    /// Extension check against the allow-list, case-insensitive.
    fn is_allowed(&self, filename: &str) -> bool {
        match filename.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => {
                let ext = ext.to_lowercase();
                self.allowed_extensions.iter().any(|a| *a == ext)
            }
            _ => false,
        }
    }
}

/// Reduce an untrusted filename to a safe basename.
///
/// Path components are stripped, anything outside `[A-Za-z0-9._-]` becomes
/// an underscore, and leading dots are removed so the result can never be
/// hidden or escape the upload directory.
fn sanitize_filename(filename: &str) -> Result<String> {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.').to_string();

    if cleaned.is_empty() || cleaned.chars().all(|c| c == '_' || c == '.') {
        return Err(Error::InvalidInput("invalid filename".to_string()));
    }

    Ok(cleaned)
}
