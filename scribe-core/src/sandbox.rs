//! Path sandboxing for untrusted, caller-supplied paths.
//!
//! Every filesystem operation in [`crate::store::FileStore`] resolves its
//! path through a [`PathGuard`] before touching storage. Resolution is pure
//! path arithmetic; the only filesystem access happens once, in
//! [`PathGuard::new`], to canonicalize the root.

use std::path::{Component, Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SandboxError {
    #[error("workspace root {path} is not usable: {reason}")]
    InvalidRoot { path: PathBuf, reason: String },

    #[error("path {path:?} escapes the workspace root")]
    PathEscape { path: String },

    #[error("path {path:?} contains control characters")]
    ControlCharacters { path: String },
}

/// Resolves relative paths against a fixed, canonicalized root and rejects
/// any resolution that would leave it.
#[derive(Debug, Clone)]
pub struct PathGuard {
    root: PathBuf,
}

impl PathGuard {
    /// Canonicalizes `root` and verifies it is an existing directory.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, SandboxError> {
        let root = root.as_ref();
        let canonical = root.canonicalize().map_err(|err| SandboxError::InvalidRoot {
            path: root.to_path_buf(),
            reason: err.to_string(),
        })?;
        if !canonical.is_dir() {
            return Err(SandboxError::InvalidRoot {
                path: canonical,
                reason: "not a directory".to_string(),
            });
        }
        Ok(Self { root: canonical })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves `candidate` against the root, normalizing `.`/`..` and
    /// redundant separators lexically. Succeeds only when the result is the
    /// root itself or a descendant of it.
    ///
    /// Containment is checked component-wise, so a sibling directory sharing
    /// a name prefix (`/work-2` next to `/work`) never passes.
    pub fn resolve(&self, candidate: &str) -> Result<PathBuf, SandboxError> {
        if candidate
            .chars()
            .any(|c| matches!(c, '\0' | '\r' | '\n' | '\t'))
        {
            return Err(SandboxError::ControlCharacters {
                path: candidate.to_string(),
            });
        }

        let requested = Path::new(candidate);
        if requested.is_absolute() {
            // Absolute input is allowed only when it already names something
            // inside the root.
            let normalized = normalize_absolute(requested);
            if normalized.starts_with(&self.root) {
                return Ok(normalized);
            }
            return Err(SandboxError::PathEscape {
                path: candidate.to_string(),
            });
        }

        let mut kept: Vec<&std::ffi::OsStr> = Vec::new();
        for component in requested.components() {
            match component {
                Component::Normal(part) => kept.push(part),
                Component::CurDir => {}
                Component::ParentDir => {
                    if kept.pop().is_none() {
                        // `..` past the top of the relative path would land
                        // outside the root no matter what the root is.
                        return Err(SandboxError::PathEscape {
                            path: candidate.to_string(),
                        });
                    }
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(SandboxError::PathEscape {
                        path: candidate.to_string(),
                    });
                }
            }
        }

        let mut resolved = self.root.clone();
        for part in kept {
            resolved.push(part);
        }
        Ok(resolved)
    }
}

fn normalize_absolute(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guard() -> (tempfile::TempDir, PathGuard) {
        let dir = tempfile::tempdir().expect("tempdir");
        let guard = PathGuard::new(dir.path()).expect("guard");
        (dir, guard)
    }

    #[test]
    fn resolves_descendants() {
        let (_dir, guard) = guard();
        let resolved = guard.resolve("a/b").expect("resolve");
        assert_eq!(resolved, guard.root().join("a").join("b"));
    }

    #[test]
    fn empty_candidate_is_the_root() {
        let (_dir, guard) = guard();
        assert_eq!(guard.resolve("").expect("resolve"), guard.root());
        assert_eq!(guard.resolve(".").expect("resolve"), guard.root());
    }

    #[test]
    fn rejects_parent_escape() {
        let (_dir, guard) = guard();
        assert!(matches!(
            guard.resolve("../x"),
            Err(SandboxError::PathEscape { .. })
        ));
    }

    #[test]
    fn rejects_sibling_with_shared_prefix() {
        let (_dir, guard) = guard();
        let sibling = format!(
            "../{}-2/x",
            guard
                .root()
                .file_name()
                .and_then(|n| n.to_str())
                .expect("root name")
        );
        assert!(matches!(
            guard.resolve(&sibling),
            Err(SandboxError::PathEscape { .. })
        ));
    }

    #[test]
    fn rejects_escape_through_intermediate_dirs() {
        let (_dir, guard) = guard();
        assert!(matches!(
            guard.resolve("a/../../x"),
            Err(SandboxError::PathEscape { .. })
        ));
    }

    #[test]
    fn dotdot_inside_root_is_fine() {
        let (_dir, guard) = guard();
        let resolved = guard.resolve("a/../b").expect("resolve");
        assert_eq!(resolved, guard.root().join("b"));
    }

    #[test]
    fn surrounding_whitespace_is_part_of_the_name() {
        // Legal file names on Linux; resolve them as given.
        let (_dir, guard) = guard();
        let resolved = guard.resolve(" padded ").expect("resolve");
        assert_eq!(resolved, guard.root().join(" padded "));
    }

    #[test]
    fn rejects_control_characters() {
        let (_dir, guard) = guard();
        assert!(matches!(
            guard.resolve("a\nb"),
            Err(SandboxError::ControlCharacters { .. })
        ));
    }

    #[test]
    fn absolute_path_inside_root_is_accepted() {
        let (_dir, guard) = guard();
        let inside = guard.root().join("f.txt");
        let resolved = guard
            .resolve(inside.to_str().expect("utf-8 path"))
            .expect("resolve");
        assert_eq!(resolved, inside);
    }

    #[test]
    fn absolute_path_outside_root_is_rejected() {
        let (_dir, guard) = guard();
        assert!(matches!(
            guard.resolve("/etc/passwd"),
            Err(SandboxError::PathEscape { .. })
        ));
    }
}
