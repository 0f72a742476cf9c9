//! Unified-diff patch engine.
//!
//! [`apply`] parses a unified diff (the format produced by `diff -u` and
//! `git diff`) and replays it against an original text, producing the patched
//! text or a precise error. Application is a pure in-memory computation: no
//! I/O, no state shared across calls. Output lines are joined with `\n`, so
//! the original's line-ending style and a missing trailing newline are not
//! preserved.

mod apply;
mod error;
mod parser;

pub use error::PatchError;

/// How tolerant the engine is of patches that bend the unified-diff format.
///
/// `Lenient` reproduces the historical behavior: raw body lines with no
/// prefix character are skipped, and a hunk whose body consumes fewer
/// original lines than its header declares has the gap back-filled from the
/// original as if it were context. `Strict` turns both into errors so
/// malformed patches cannot slip through silently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ApplyMode {
    #[default]
    Lenient,
    Strict,
}

/// One line of a hunk body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HunkLine {
    /// Unchanged line, present in both original and result; must match the
    /// original at the current cursor.
    Context(String),
    /// Line deleted from the original; must match, is not emitted.
    Removal(String),
    /// Line inserted into the result; does not consume original input.
    Addition(String),
}

/// One contiguous block of a unified diff.
///
/// `old_start`/`new_start` are 1-based per the format; the counts default to
/// 1 when the header omits them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    pub old_start: usize,
    pub old_count: usize,
    pub new_start: usize,
    pub new_count: usize,
    pub lines: Vec<HunkLine>,
}

/// A parsed unified-diff document: hunks in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Patch {
    pub hunks: Vec<Hunk>,
}

/// Applies `patch_text` to `original` in [`ApplyMode::Lenient`] mode.
pub fn apply(original: &str, patch_text: &str) -> Result<String, PatchError> {
    apply_with_mode(original, patch_text, ApplyMode::Lenient)
}

/// Applies `patch_text` to `original`, failing on the first context or
/// removal mismatch. Hunks are applied in the order they appear; each hunk's
/// `old_start` is interpreted against the original numbering, never a running
/// offset.
pub fn apply_with_mode(
    original: &str,
    patch_text: &str,
    mode: ApplyMode,
) -> Result<String, PatchError> {
    let patch = parser::parse(patch_text, mode)?;
    apply::apply_hunks(original, &patch, mode)
}
