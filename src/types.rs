//! Core types for reply extraction

use serde::{Deserialize, Serialize};
use std::fmt;

/// The body of a single email, as handed over by the mail retrieval layer
///
/// Either representation may be missing. An empty string counts as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailBody {
    /// HTML representation (if available)
    pub html: Option<String>,

    /// Plain text representation (if available)
    pub text: Option<String>,
}

impl EmailBody {
    /// Body carrying both representations
    #[must_use]
    pub fn both(html: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            html: Some(html.into()),
            text: Some(text.into()),
        }
    }

    /// Body with only an HTML part
    #[must_use]
    pub fn html(html: impl Into<String>) -> Self {
        Self {
            html: Some(html.into()),
            text: None,
        }
    }

    /// Body with only a plain text part
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            html: None,
            text: Some(text.into()),
        }
    }

    /// Decode a raw RFC 5322 message and keep its first text and HTML parts
    pub fn parse(raw: &[u8]) -> crate::Result<Self> {
        crate::parser::parse_body(raw)
    }

    /// HTML part, if present and non-empty
    #[must_use]
    pub fn html_part(&self) -> Option<&str> {
        self.html.as_deref().filter(|h| !h.is_empty())
    }

    /// Text part, if present and non-empty
    #[must_use]
    pub fn text_part(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }
}

/// Which branch of the extraction produced the content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pathway {
    /// A quote boundary was found in the HTML and the markup was cut there
    HtmlTruncated,

    /// HTML was present but no boundary was found; returned as received
    HtmlUnchanged,

    /// Plain text was scanned and normalized to markup
    Text,

    /// Neither part was usable
    Empty,
}

impl Pathway {
    /// Whether the content came from the HTML part
    #[must_use]
    pub const fn is_html(self) -> bool {
        matches!(self, Self::HtmlTruncated | Self::HtmlUnchanged)
    }
}

impl fmt::Display for Pathway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::HtmlTruncated => "html (truncated)",
            Self::HtmlUnchanged => "html (unchanged)",
            Self::Text => "text",
            Self::Empty => "empty",
        };
        f.write_str(name)
    }
}

/// Result of running the extraction on one body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    /// Newly authored content, as markup
    pub content: String,

    /// Branch that produced `content`
    pub pathway: Pathway,
}

impl Extraction {
    #[must_use]
    pub const fn new(content: String, pathway: Pathway) -> Self {
        Self { content, pathway }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

impl fmt::Display for Extraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.content)
    }
}

/// What to do when HTML is present but carries no recognizable quote boundary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HtmlFallback {
    /// Return the HTML exactly as received; text is never consulted
    #[default]
    Original,

    /// Scan the plain text part instead, if there is one
    Text,
}
