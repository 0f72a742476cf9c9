//! Hunk application over line sequences.

use super::error::PatchError;
use super::{ApplyMode, Hunk, HunkLine, Patch};

/// Read position into the original line sequence. 0-based, monotonically
/// non-decreasing; threaded by value through each hunk.
#[derive(Debug, Clone, Copy, Default)]
struct Cursor {
    line: usize,
}

pub(super) fn apply_hunks(
    original: &str,
    patch: &Patch,
    mode: ApplyMode,
) -> Result<String, PatchError> {
    let original_lines: Vec<&str> = original.split('\n').collect();
    let mut output: Vec<&str> = Vec::with_capacity(original_lines.len());
    let mut cursor = Cursor::default();

    for hunk in &patch.hunks {
        cursor = apply_hunk(&original_lines, hunk, cursor, &mut output, mode)?;
    }

    // Lines beyond the last hunk's reach pass through unchanged.
    output.extend_from_slice(&original_lines[cursor.line.min(original_lines.len())..]);

    Ok(output.join("\n"))
}

fn apply_hunk<'a>(
    original: &[&'a str],
    hunk: &'a Hunk,
    mut cursor: Cursor,
    output: &mut Vec<&'a str>,
    mode: ApplyMode,
) -> Result<Cursor, PatchError> {
    let hunk_start = hunk.old_start.saturating_sub(1);

    // Lines between the previous hunk and this one are plain passthrough.
    while cursor.line < hunk_start && cursor.line < original.len() {
        output.push(original[cursor.line]);
        cursor.line += 1;
    }

    for line in &hunk.lines {
        match line {
            HunkLine::Context(text) => {
                if original.get(cursor.line) != Some(&text.as_str()) {
                    return Err(PatchError::ContextMismatch {
                        line: cursor.line + 1,
                        expected: text.clone(),
                    });
                }
                output.push(text);
                cursor.line += 1;
            }
            HunkLine::Removal(text) => {
                if original.get(cursor.line) != Some(&text.as_str()) {
                    return Err(PatchError::RemovalMismatch {
                        line: cursor.line + 1,
                        expected: text.clone(),
                    });
                }
                cursor.line += 1;
            }
            HunkLine::Addition(text) => {
                output.push(text);
            }
        }
    }

    // The header promised `old_count` consumed lines. A body that stops short
    // of that under-specified its trailing context.
    let target = hunk_start + hunk.old_count;
    if cursor.line < target {
        match mode {
            ApplyMode::Strict => {
                // A hunk header pointing past the end of the original leaves
                // the cursor short of hunk_start; saturate rather than
                // underflow.
                return Err(PatchError::TruncatedHunk {
                    old_start: hunk.old_start,
                    expected: hunk.old_count,
                    actual: cursor.line.saturating_sub(hunk_start),
                });
            }
            ApplyMode::Lenient => {
                while cursor.line < target && cursor.line < original.len() {
                    output.push(original[cursor.line]);
                    cursor.line += 1;
                }
            }
        }
    }

    Ok(cursor)
}

#[cfg(test)]
mod tests {
    use crate::patch::{ApplyMode, PatchError, apply, apply_with_mode};

    #[test]
    fn replaces_a_single_line() {
        let original = "alpha\nbeta\ngamma";
        let patch = "@@ -2,1 +2,1 @@\n-beta\n+BETA";
        assert_eq!(apply(original, patch).expect("apply"), "alpha\nBETA\ngamma");
    }

    #[test]
    fn multi_hunk_offsets_stay_in_original_numbering() {
        let original = "A\nB\nC\nD\nE";
        let patch = "@@ -2,1 +2,1 @@\n-B\n+B2\n@@ -4,1 +4,1 @@\n-D\n+D2";
        assert_eq!(apply(original, patch).expect("apply"), "A\nB2\nC\nD2\nE");
    }

    #[test]
    fn context_only_patch_is_a_no_op() {
        let original = "one\ntwo\nthree";
        let patch = "@@ -1,3 +1,3 @@\n one\n two\n three";
        assert_eq!(apply(original, patch).expect("apply"), original);
    }

    #[test]
    fn context_mismatch_aborts() {
        let original = "one\ntwo\nthree";
        let patch = "@@ -1,2 +1,2 @@\n one\n twX";
        assert!(matches!(
            apply(original, patch),
            Err(PatchError::ContextMismatch { line: 2, .. })
        ));
    }

    #[test]
    fn removal_mismatch_aborts() {
        let original = "one\ntwo";
        let patch = "@@ -1,1 +1,0 @@\n-onX";
        assert!(matches!(
            apply(original, patch),
            Err(PatchError::RemovalMismatch { line: 1, .. })
        ));
    }

    #[test]
    fn additions_do_not_consume_original_lines() {
        let original = "a\nb";
        let patch = "@@ -1,1 +1,3 @@\n a\n+x\n+y";
        assert_eq!(apply(original, patch).expect("apply"), "a\nx\ny\nb");
    }

    #[test]
    fn insert_into_empty_original() {
        // A missing file reads as the empty string, which splits to [""].
        let patch = "@@ -0,0 +1,2 @@\n+hello\n+world";
        assert_eq!(apply("", patch).expect("apply"), "hello\nworld\n");
    }

    #[test]
    fn under_specified_hunk_backfills_in_lenient_mode() {
        let original = "a\nb\nc\nd";
        // Header claims three original lines but the body only names one.
        let patch = "@@ -1,3 +1,3 @@\n-a\n+A";
        assert_eq!(apply(original, patch).expect("apply"), "A\nb\nc\nd");

        assert!(matches!(
            apply_with_mode(original, patch, ApplyMode::Strict),
            Err(PatchError::TruncatedHunk {
                old_start: 1,
                expected: 3,
                actual: 1,
            })
        ));
    }

    #[test]
    fn hunk_past_end_of_original_errors_in_strict_mode() {
        let original = "a\nb";
        let patch = "@@ -10,2 +10,2 @@\n+x";

        assert!(matches!(
            apply_with_mode(original, patch, ApplyMode::Strict),
            Err(PatchError::TruncatedHunk {
                old_start: 10,
                expected: 2,
                actual: 0,
            })
        ));

        // Lenient mode appends after the passthrough, as before.
        assert_eq!(apply(original, patch).expect("apply"), "a\nb\nx");
    }

    #[test]
    fn trailing_lines_pass_through() {
        let original = "a\nb\nc\nd\ne";
        let patch = "@@ -1,1 +1,1 @@\n-a\n+A";
        assert_eq!(apply(original, patch).expect("apply"), "A\nb\nc\nd\ne");
    }

    #[test]
    fn crlf_patch_applies_to_lf_original() {
        let original = "left\nright";
        let patch = "@@ -1,2 +1,2 @@\r\n left\r\n-right\r\n+RIGHT\r\n";
        assert_eq!(apply(original, patch).expect("apply"), "left\nRIGHT");
    }
}
