//! Choosing between the HTML and text pathways

use crate::html::strip_quoted_html;
use crate::patterns::{
    DEFAULT_REPLY_MARKER, HtmlMatcher, HtmlPatternList, LineWindow, TextPatternList,
};
use crate::text::{normalize_lines, strip_quoted_text};
use crate::types::{EmailBody, Extraction, HtmlFallback, Pathway};
use tracing::debug;

/// Extracts the newly written part of reply emails
///
/// Holds only immutable pattern tables, so one instance can be shared by any
/// number of threads.
#[derive(Debug, Clone)]
pub struct ReplyExtractor {
    html_patterns: HtmlPatternList,
    text_patterns: TextPatternList,
    reply_marker: String,
    line_window: LineWindow,
    html_fallback: HtmlFallback,
}

impl Default for ReplyExtractor {
    fn default() -> Self {
        Self {
            html_patterns: HtmlPatternList::default(),
            text_patterns: TextPatternList::defaults(),
            reply_marker: DEFAULT_REPLY_MARKER.to_string(),
            line_window: LineWindow::default(),
            html_fallback: HtmlFallback::default(),
        }
    }
}

impl ReplyExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check `external` ahead of the built-in HTML matchers
    #[must_use]
    pub fn with_html_patterns(mut self, external: Vec<HtmlMatcher>) -> Self {
        self.html_patterns = HtmlPatternList::with_external(external);
        self
    }

    /// Replace the whole HTML matcher list, built-ins included
    #[must_use]
    pub fn with_html_pattern_list(mut self, patterns: HtmlPatternList) -> Self {
        self.html_patterns = patterns;
        self
    }

    #[must_use]
    pub fn with_text_patterns(mut self, patterns: TextPatternList) -> Self {
        self.text_patterns = patterns;
        self
    }

    #[must_use]
    pub fn with_reply_marker(mut self, marker: impl Into<String>) -> Self {
        self.reply_marker = marker.into();
        self
    }

    #[must_use]
    pub const fn with_line_window(mut self, window: LineWindow) -> Self {
        self.line_window = window;
        self
    }

    #[must_use]
    pub const fn with_html_fallback(mut self, fallback: HtmlFallback) -> Self {
        self.html_fallback = fallback;
        self
    }

    #[must_use]
    pub const fn html_patterns(&self) -> &HtmlPatternList {
        &self.html_patterns
    }

    #[must_use]
    pub const fn text_patterns(&self) -> &TextPatternList {
        &self.text_patterns
    }

    #[must_use]
    pub fn reply_marker(&self) -> &str {
        &self.reply_marker
    }

    #[must_use]
    pub const fn line_window(&self) -> LineWindow {
        self.line_window
    }

    #[must_use]
    pub const fn html_fallback(&self) -> HtmlFallback {
        self.html_fallback
    }

    /// Newly authored content of `body`, as markup
    #[must_use]
    pub fn extract(&self, body: &EmailBody) -> String {
        self.extract_detailed(body).content
    }

    /// Like [`extract`](Self::extract), also reporting which pathway was taken
    #[must_use]
    pub fn extract_detailed(&self, body: &EmailBody) -> Extraction {
        if let Some(html) = body.html_part() {
            debug!("Detected HTML message, removing quoted content");
            if let Some(truncated) = self.strip_html(html) {
                return Extraction::new(truncated, Pathway::HtmlTruncated);
            }

            if let (HtmlFallback::Text, Some(text)) = (self.html_fallback, body.text_part()) {
                debug!("No quoted message found in HTML, falling back to plain text");
                return self.extract_text(text);
            }

            debug!("No quoted message found in HTML, keeping it unchanged");
            return Extraction::new(html.to_string(), Pathway::HtmlUnchanged);
        }

        if let Some(text) = body.text_part() {
            debug!("HTML not present, removing quoted content from plain text");
            return self.extract_text(text);
        }

        debug!("Neither HTML nor text present in message");
        Extraction::new(body.html.clone().unwrap_or_default(), Pathway::Empty)
    }

    /// HTML before the quote boundary, if one was found
    #[must_use]
    pub fn strip_html(&self, html: &str) -> Option<String> {
        strip_quoted_html(html, &self.html_patterns)
    }

    /// Lines of `text` before the quote boundary
    #[must_use]
    pub fn strip_text<'a>(&self, text: &'a str) -> Vec<&'a str> {
        strip_quoted_text(
            text,
            &self.reply_marker,
            &self.text_patterns,
            self.line_window,
        )
    }

    fn extract_text(&self, text: &str) -> Extraction {
        let lines = self.strip_text(text);
        Extraction::new(normalize_lines(lines.as_slice()), Pathway::Text)
    }
}

static DEFAULT_EXTRACTOR: std::sync::LazyLock<ReplyExtractor> =
    std::sync::LazyLock::new(ReplyExtractor::default);

/// Extract the reply from `body` with the built-in patterns
#[must_use]
pub fn extract_reply(body: &EmailBody) -> String {
    DEFAULT_EXTRACTOR.extract(body)
}
