//! Serializable extractor configuration
//!
//! ```json
//! {
//!   "html_patterns": [
//!     { "tag": "div", "class": "yahoo_quoted" },
//!     { "tag": "blockquote", "attrs": { "type": "cite" } },
//!     { "predicate": "outlook_quoted_header" }
//!   ],
//!   "text_patterns": ["^On .* wrote:$"],
//!   "max_line_wrap": 2,
//!   "html_fallback": "original"
//! }
//! ```

use crate::error::{ConfigError, ConfigResult};
use crate::extractor::ReplyExtractor;
use crate::patterns::{
    DEFAULT_LINE_WINDOW, DEFAULT_REPLY_MARKER, HtmlMatcher, HtmlPredicate, LineWindow, TagPattern,
    TextPatternList,
};
use crate::types::HtmlFallback;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// One externally configured HTML matcher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HtmlPatternConfig {
    /// A predicate shipped with this crate, by name
    Predicate { predicate: String },

    /// Tag name with optional class, id and exact attribute values
    Tag {
        tag: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        class: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        attrs: BTreeMap<String, String>,
    },
}

impl HtmlPatternConfig {
    pub fn to_matcher(&self) -> ConfigResult<HtmlMatcher> {
        match self {
            Self::Predicate { predicate } => HtmlPredicate::named(predicate)
                .map(HtmlMatcher::Custom)
                .ok_or_else(|| ConfigError::UnknownPredicate(predicate.clone())),
            Self::Tag {
                tag,
                class,
                id,
                attrs,
            } => {
                let mut pattern = TagPattern::new(tag.as_str())?;
                if let Some(class) = class {
                    pattern = pattern.with_class(class.as_str());
                }
                if let Some(id) = id {
                    pattern = pattern.with_id(id.as_str());
                }
                for (name, value) in attrs {
                    pattern = pattern.with_attr(name.as_str(), value.as_str());
                }
                Ok(HtmlMatcher::Structural(pattern))
            }
        }
    }
}

/// Settings for a [`ReplyExtractor`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractorConfig {
    /// Matchers tried before the built-in HTML list
    pub html_patterns: Vec<HtmlPatternConfig>,

    /// Text reply regexes; the built-in set is used when absent
    pub text_patterns: Option<Vec<String>>,

    /// Trailing lines joined when looking for a wrapped header
    pub max_line_wrap: usize,

    /// Literal line content that ends the reply
    pub reply_marker: String,

    /// Behavior when the HTML has no recognizable boundary
    pub html_fallback: HtmlFallback,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            html_patterns: Vec::new(),
            text_patterns: None,
            max_line_wrap: DEFAULT_LINE_WINDOW,
            reply_marker: DEFAULT_REPLY_MARKER.to_string(),
            html_fallback: HtmlFallback::default(),
        }
    }
}

impl ExtractorConfig {
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate every setting and compile the patterns
    pub fn build(&self) -> ConfigResult<ReplyExtractor> {
        let html_patterns = self
            .html_patterns
            .iter()
            .map(HtmlPatternConfig::to_matcher)
            .collect::<ConfigResult<Vec<_>>>()?;

        let text_patterns = match &self.text_patterns {
            Some(patterns) => TextPatternList::compile(patterns)?,
            None => TextPatternList::defaults(),
        };

        let line_window = LineWindow::new(self.max_line_wrap)?;

        debug!(
            html_patterns = html_patterns.len(),
            text_patterns = text_patterns.len(),
            max_line_wrap = self.max_line_wrap,
            "Built reply extractor"
        );

        Ok(ReplyExtractor::new()
            .with_html_patterns(html_patterns)
            .with_text_patterns(text_patterns)
            .with_reply_marker(self.reply_marker.as_str())
            .with_line_window(line_window)
            .with_html_fallback(self.html_fallback))
    }
}
