//! Session Storage
//!
//! Reads and writes the session document at a fixed path. A missing or
//! undecodable file is reported as [`LoadOutcome::AbsentOrInvalid`];
//! the caller owns the fallback (a fresh default session).

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::types::SessionDocument;
use crate::config::AppConfig;

/// Session storage errors
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Outcome of a load attempt
///
/// Absence and corruption share one variant: both mean "no session to
/// restore" and both take the same fallback path.
#[derive(Debug)]
pub enum LoadOutcome {
    /// A valid persisted session, exactly as written
    Session(SessionDocument),
    /// No file at the path, or a file that could not be decoded
    AbsentOrInvalid,
}

/// Durable load/save of exactly one session document
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Storage at the configured session file path
    pub fn new(config: &AppConfig) -> Self {
        Self {
            path: config.session_file.clone(),
        }
    }

    /// Storage at a custom path (for testing)
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the session file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the session file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the persisted session
    ///
    /// Never fails and never panics: a missing, unreadable, or
    /// undecodable file yields `AbsentOrInvalid` after logging. A
    /// corrupted file is backed up first so the next save does not
    /// silently destroy it.
    pub fn load(&self) -> LoadOutcome {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No session file at {:?}", self.path);
                return LoadOutcome::AbsentOrInvalid;
            }
            Err(e) => {
                tracing::error!("Failed to read session file {:?}: {}", self.path, e);
                return LoadOutcome::AbsentOrInvalid;
            }
        };

        match SessionDocument::from_json(&contents) {
            Ok(document) => LoadOutcome::Session(document),
            Err(e) => {
                tracing::error!("Session file corrupted: {}", e);

                match self.backup() {
                    Ok(backup_path) => {
                        tracing::warn!("Corrupted session backed up to {:?}", backup_path);
                    }
                    Err(backup_err) => {
                        tracing::error!("Failed to back up corrupted session: {}", backup_err);
                    }
                }

                LoadOutcome::AbsentOrInvalid
            }
        }
    }

    /// Save the session document
    ///
    /// Writes the full document to a temp file, syncs, then renames it
    /// into place, so a reader never observes a half-written file.
    /// `pretty` selects human-readable formatting only.
    pub fn save(&self, document: &SessionDocument, pretty: bool) -> Result<(), StorageError> {
        self.ensure_dir()?;

        let json = document.to_json(pretty)?;
        let temp_path = self.path.with_extension("json.tmp");

        let mut file = fs::File::create(&temp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&temp_path, &self.path)?;

        Ok(())
    }

    /// Ensure the session directory exists
    fn ensure_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Copy the current session file to a timestamped sibling
    pub fn backup(&self) -> Result<PathBuf, StorageError> {
        let backup_path = self.path.with_extension(format!(
            "json.backup.{}",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        ));

        if self.exists() {
            fs::copy(&self.path, &backup_path)?;
        }

        Ok(backup_path)
    }
}
