//! Sandboxed file store: list/read/write/delete confined to one root.
//!
//! Every operation resolves its path through [`PathGuard`] before any I/O.
//! `write` accepts either full contents or a unified diff; a failed patch
//! never touches storage. The store keeps no content cache between calls —
//! each operation re-reads from disk.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;
use tracing::debug;

use crate::config::WorkspaceConfig;
use crate::patch::{self, PatchError};
use crate::sandbox::{PathGuard, SandboxError};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Sandbox(#[from] SandboxError),

    #[error("not found: {path}")]
    NotFound { path: String },

    #[error(transparent)]
    Patch(#[from] PatchError),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("failed to {action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

/// One directory entry, in the shape tool callers receive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryInfo {
    pub name: String,
    pub kind: EntryKind,
}

/// Result of a successful write.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WriteOutcome {
    pub wrote_bytes: usize,
}

/// Payload for [`FileStore::write`]: exactly one of the two must be set.
#[derive(Debug, Clone, Default)]
pub struct WriteRequest {
    pub contents: Option<String>,
    pub patch: Option<String>,
}

impl WriteRequest {
    pub fn contents(text: impl Into<String>) -> Self {
        Self {
            contents: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn patch(diff: impl Into<String>) -> Self {
        Self {
            patch: Some(diff.into()),
            ..Self::default()
        }
    }
}

pub struct FileStore {
    guard: PathGuard,
    config: WorkspaceConfig,
}

impl FileStore {
    pub fn new(config: WorkspaceConfig) -> Result<Self, StoreError> {
        let guard = PathGuard::new(&config.root)?;
        Ok(Self { guard, config })
    }

    pub fn root(&self) -> &Path {
        self.guard.root()
    }

    /// Lists the entries of `dir` (non-recursive), sorted by name.
    pub async fn list(&self, dir: &str) -> Result<Vec<EntryInfo>, StoreError> {
        let resolved = self.guard.resolve(dir)?;

        let mut reader = match fs::read_dir(&resolved).await {
            Ok(reader) => reader,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(StoreError::NotFound {
                    path: dir.to_string(),
                });
            }
            Err(err) => return Err(io_error("list", resolved, err)),
        };

        let mut entries = Vec::new();
        while let Some(entry) = reader
            .next_entry()
            .await
            .map_err(|err| io_error("list", resolved.clone(), err))?
        {
            let file_type = entry
                .file_type()
                .await
                .map_err(|err| io_error("inspect", entry.path(), err))?;
            entries.push(EntryInfo {
                name: entry.file_name().to_string_lossy().into_owned(),
                kind: if file_type.is_dir() {
                    EntryKind::Directory
                } else {
                    EntryKind::File
                },
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    /// Reads `file` as UTF-8 text, truncated to `max_bytes` (defaulting to
    /// the configured cap) before decoding.
    pub async fn read(&self, file: &str, max_bytes: Option<usize>) -> Result<String, StoreError> {
        let resolved = self.guard.resolve(file)?;

        let bytes = match fs::read(&resolved).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(StoreError::NotFound {
                    path: file.to_string(),
                });
            }
            Err(err) => return Err(io_error("read", resolved, err)),
        };

        let max = max_bytes.unwrap_or(self.config.max_read_bytes);
        let clipped = &bytes[..bytes.len().min(max)];
        Ok(String::from_utf8_lossy(clipped).into_owned())
    }

    /// Writes `file`, creating parent directories as needed.
    ///
    /// With `patch` set, the current contents (empty for a missing file) are
    /// patched in memory and only a successful result is persisted.
    pub async fn write(
        &self,
        file: &str,
        request: WriteRequest,
    ) -> Result<WriteOutcome, StoreError> {
        let resolved = self.guard.resolve(file)?;

        let new_contents = match (request.contents, request.patch) {
            (None, None) => {
                return Err(StoreError::InvalidArgument(
                    "provide `contents` or `patch`".to_string(),
                ));
            }
            (Some(_), Some(_)) => {
                return Err(StoreError::InvalidArgument(
                    "provide `contents` or `patch`, not both".to_string(),
                ));
            }
            (Some(contents), None) => contents,
            (None, Some(diff)) => {
                let original = match fs::read_to_string(&resolved).await {
                    Ok(text) => text,
                    Err(err) if err.kind() == ErrorKind::NotFound => String::new(),
                    Err(err) => return Err(io_error("read", resolved, err)),
                };
                patch::apply_with_mode(&original, &diff, self.config.apply_mode())?
            }
        };

        if let Some(parent) = resolved.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|err| io_error("create directories", parent.to_path_buf(), err))?;
        }

        fs::write(&resolved, &new_contents)
            .await
            .map_err(|err| io_error("write", resolved.clone(), err))?;

        debug!(path = %resolved.display(), bytes = new_contents.len(), "wrote file");
        Ok(WriteOutcome {
            wrote_bytes: new_contents.len(),
        })
    }

    /// Removes `path`, recursively for directories. Succeeds when the path
    /// does not exist, so deletes are idempotent.
    pub async fn delete(&self, path: &str) -> Result<(), StoreError> {
        let resolved = self.guard.resolve(path)?;

        match fs::metadata(&resolved).await {
            Ok(metadata) if metadata.is_dir() => fs::remove_dir_all(&resolved)
                .await
                .map_err(|err| io_error("delete", resolved, err)),
            Ok(_) => fs::remove_file(&resolved)
                .await
                .map_err(|err| io_error("delete", resolved, err)),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %resolved.display(), "delete target already absent");
                Ok(())
            }
            Err(err) => Err(io_error("inspect", resolved, err)),
        }
    }
}

fn io_error(action: &'static str, path: PathBuf, source: std::io::Error) -> StoreError {
    StoreError::Io {
        action,
        path,
        source,
    }
}
