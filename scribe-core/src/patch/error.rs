use thiserror::Error;

/// Failures surfaced by unified-diff parsing and application.
///
/// Line numbers are 1-based: `line` in the mismatch variants points into the
/// original text, `patch_line` in the parse variants points into the patch.
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("patch failed: context mismatch at original line {line} (expected {expected:?})")]
    ContextMismatch { line: usize, expected: String },

    #[error("patch failed: removal mismatch at original line {line} (expected {expected:?})")]
    RemovalMismatch { line: usize, expected: String },

    #[error("malformed hunk header at patch line {patch_line}: {text:?}")]
    MalformedHeader { patch_line: usize, text: String },

    #[error("patch line {patch_line} is missing a ' ', '-', or '+' prefix")]
    MissingPrefix { patch_line: usize },

    #[error(
        "hunk at old line {old_start} consumed {actual} of the {expected} original lines its header declares"
    )]
    TruncatedHunk {
        old_start: usize,
        expected: usize,
        actual: usize,
    },
}
