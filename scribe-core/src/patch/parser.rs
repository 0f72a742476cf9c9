//! Unified-diff text -> [`Patch`] parsing.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{trace, warn};

use super::error::PatchError;
use super::{ApplyMode, Hunk, HunkLine, Patch};

static HUNK_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@").expect("valid hunk header pattern")
});

const NO_NEWLINE_MARKER: &str = "\\ No newline at end of file";

pub(super) fn parse(text: &str, mode: ApplyMode) -> Result<Patch, PatchError> {
    // Patches arrive LF or CRLF separated; a trailing CR per line is shed
    // here so body content compares cleanly against LF-split originals.
    let lines: Vec<&str> = text.split('\n').map(strip_carriage_return).collect();

    let mut hunks = Vec::new();
    let mut index = 0;

    while index < lines.len() {
        let line = lines[index];

        let Some(header) = parse_header(line, index)? else {
            // File-level metadata (`---`/`+++`, `diff --git`, ...) before the
            // first hunk, or stray lines between hunks.
            if !line.is_empty() {
                trace!(line, "skipping non-hunk patch line");
            }
            index += 1;
            continue;
        };

        index += 1;
        let mut body = Vec::new();

        while index < lines.len() && !lines[index].starts_with("@@ ") {
            let raw = lines[index];

            if raw == NO_NEWLINE_MARKER {
                index += 1;
                continue;
            }

            if raw.is_empty() {
                // A trailing `\n` on the patch text itself is not body input.
                if index == lines.len() - 1 {
                    index += 1;
                    continue;
                }
                // Unified diff prefixes every body line, even empty payloads,
                // so a bare empty line is unexpected input.
                match mode {
                    ApplyMode::Strict => {
                        return Err(PatchError::MissingPrefix {
                            patch_line: index + 1,
                        });
                    }
                    ApplyMode::Lenient => {
                        trace!(patch_line = index + 1, "skipping empty patch body line");
                        index += 1;
                        continue;
                    }
                }
            }

            let mut chars = raw.chars();
            let prefix = chars.next().unwrap_or(' ');
            let content = chars.as_str();

            match prefix {
                ' ' => body.push(HunkLine::Context(content.to_string())),
                '-' => body.push(HunkLine::Removal(content.to_string())),
                '+' => body.push(HunkLine::Addition(content.to_string())),
                _ => {
                    warn!(line = raw, "skipping unknown line prefix in patch");
                }
            }

            index += 1;
        }

        hunks.push(Hunk {
            old_start: header.0,
            old_count: header.1,
            new_start: header.2,
            new_count: header.3,
            lines: body,
        });
    }

    Ok(Patch { hunks })
}

/// Parses a hunk header. Returns `Ok(None)` for lines that are not headers;
/// a line that announces itself as a header (`@@ ` prefix) but does not match
/// the full pattern is an error rather than something to silently skip.
fn parse_header(
    line: &str,
    index: usize,
) -> Result<Option<(usize, usize, usize, usize)>, PatchError> {
    let Some(captures) = HUNK_HEADER.captures(line) else {
        if line.starts_with("@@ ") {
            return Err(PatchError::MalformedHeader {
                patch_line: index + 1,
                text: line.to_string(),
            });
        }
        return Ok(None);
    };

    let number = |group: usize, default: usize| -> usize {
        captures
            .get(group)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(default)
    };

    Ok(Some((
        number(1, 1),
        number(2, 1),
        number(3, 1),
        number(4, 1),
    )))
}

fn strip_carriage_return(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}
