//! Quote boundary detection in HTML bodies
//!
//! The body is parsed as a fragment and serialized again; offsets are taken in
//! that serialized form because the parser normalizes the markup (attribute
//! quoting, implied end tags, entity forms) and the original bytes are never
//! compared against.

use crate::patterns::HtmlPatternList;
use scraper::Html;
use tracing::{debug, trace};

/// Cut `html` right before the first quote boundary found by `patterns`
///
/// Matchers are tried in list order and the first one yielding a usable
/// offset wins, even if a later matcher points to an earlier position.
/// A match sitting at the very start of the document is not usable.
///
/// Returns `None` when no matcher produced a usable boundary.
#[must_use]
pub fn strip_quoted_html(html: &str, patterns: &HtmlPatternList) -> Option<String> {
    let document = Html::parse_fragment(html);
    let raw = serialize(&document);

    if raw.is_empty() {
        debug!("HTML body is empty after parsing");
        return None;
    }

    for matcher in patterns {
        let Some(header) = matcher.find(&document) else {
            continue;
        };
        debug!(%matcher, "Found reply header");

        let offset = match raw.find(&header.html()) {
            Some(0) => {
                trace!(%matcher, "Reply header starts the document, skipping");
                continue;
            }
            None => {
                trace!(%matcher, "Reply header not found in serialized body, skipping");
                continue;
            }
            Some(offset) => offset,
        };

        // Re-parse so tags left open by the cut get closed
        let truncated = Html::parse_fragment(&raw[..offset]);
        return Some(serialize(&truncated));
    }

    None
}

fn serialize(document: &Html) -> String {
    document.root_element().inner_html()
}
