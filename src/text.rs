//! Quote boundary detection in plain text bodies, and conversion of the kept
//! lines to markup

use crate::patterns::{LineWindow, TextPatternList};
use tracing::debug;

/// ASCII line and record breaks, NEL, and the Unicode line/paragraph separators
const fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Split on every line break character, with `\r\n` counted as one. A
/// trailing terminator does not yield an empty last line.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let Some((pos, brk)) = rest.char_indices().find(|&(_, c)| is_line_break(c)) else {
            let line = rest;
            rest = "";
            return Some(line);
        };
        let line = &rest[..pos];
        let terminator = if rest[pos..].starts_with("\r\n") {
            2
        } else {
            brk.len_utf8()
        };
        rest = &rest[pos + terminator..];
        Some(line)
    })
}

/// Keep the lines of `text` written before the quoted message
///
/// Scanning stops at the first line containing `marker` (that line is
/// dropped too) or at the first line where a pattern matches one of the
/// last `window` lines joined without separator. In the latter case the
/// cut is placed at the earliest line of the matching window.
///
/// An empty `marker` is ignored.
#[must_use]
pub fn strip_quoted_text<'a>(
    text: &'a str,
    marker: &str,
    patterns: &TextPatternList,
    window: LineWindow,
) -> Vec<&'a str> {
    let mut kept = Vec::new();

    for line in split_lines(text) {
        if !marker.is_empty() && line.contains(marker) {
            debug!(line = kept.len(), "Found reply marker");
            break;
        }

        kept.push(line);

        if let Some(cut) = quote_start(&kept, patterns, window) {
            debug!(line = cut, "Found quoted text header");
            kept.truncate(cut);
            break;
        }
    }

    kept
}

/// Earliest index at which a pattern matches a window ending on the last line
fn quote_start(kept: &[&str], patterns: &TextPatternList, window: LineWindow) -> Option<usize> {
    // Windows wider than what we have would just repeat the widest one
    let widest = window.get().min(kept.len());
    let mut found: Option<usize> = None;

    for pattern in patterns {
        let hit = (1..=widest).find(|&count| {
            let joined = kept[kept.len() - count..].concat();
            pattern.is_match(&joined)
        });

        if let Some(count) = hit {
            let candidate = kept.len() - count;
            if found.is_none_or(|current| candidate < current) {
                found = Some(candidate);
            }
        }
    }

    found
}

/// Escape each line, keep its spacing, and join with `<br>`
#[must_use]
pub fn normalize_lines<S: AsRef<str>>(lines: &[S]) -> String {
    lines
        .iter()
        .map(|line| html_escape::encode_quoted_attribute(line.as_ref()).replace(' ', "&nbsp;"))
        .collect::<Vec<_>>()
        .join("<br>")
}
