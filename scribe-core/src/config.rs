//! Workspace configuration.
//!
//! Everything that used to be ambient process state (the sandbox root, read
//! caps, patch strictness) lives in an explicit struct handed to
//! [`crate::store::FileStore`] at construction, so tests can run several
//! isolated roots side by side.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::patch::ApplyMode;

/// Byte cap applied to `read` when the caller does not pass one.
pub const DEFAULT_MAX_READ_BYTES: usize = 120_000;

/// Seconds a workspace script may run before it is cut off.
pub const DEFAULT_SCRIPT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct WorkspaceConfig {
    /// Sandbox root all relative paths resolve against.
    pub root: PathBuf,

    /// Default truncation limit for reads, in bytes.
    pub max_read_bytes: usize,

    /// Whether patch application tolerates the format leniencies described in
    /// [`crate::patch::ApplyMode`].
    pub lenient_patches: bool,

    /// Timeout for `script_run` / `pkg_install` invocations.
    pub script_timeout_secs: u64,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            max_read_bytes: DEFAULT_MAX_READ_BYTES,
            lenient_patches: true,
            script_timeout_secs: DEFAULT_SCRIPT_TIMEOUT_SECS,
        }
    }
}

impl WorkspaceConfig {
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    pub fn apply_mode(&self) -> ApplyMode {
        if self.lenient_patches {
            ApplyMode::Lenient
        } else {
            ApplyMode::Strict
        }
    }

    /// Loads `scribe.toml` from `root` when present, falling back to defaults
    /// otherwise. The root itself always comes from the caller, not the file.
    pub async fn load(root: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let root = root.into();
        let config_path = root.join("scribe.toml");
        let mut config = match tokio::fs::read_to_string(&config_path).await {
            Ok(raw) => toml::from_str(&raw).map_err(|err| {
                anyhow::anyhow!("invalid config at {}: {err}", config_path.display())
            })?,
            Err(_) => {
                debug!(path = %config_path.display(), "no workspace config, using defaults");
                Self::default()
            }
        };
        config.root = root;
        Ok(config)
    }
}
