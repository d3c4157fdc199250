//! Quote boundary patterns for HTML and plain text bodies
//!
//! HTML matchers are tried strictly in list order; externally configured
//! matchers always come before the built-in ones. Text patterns are all tried
//! on every line and the earliest boundary wins.

use crate::error::{ConfigError, ConfigResult};
use regex::Regex;
use scraper::{ElementRef, Html};
use std::fmt;

/// Marker inserted above the quoted message by our own notification emails
pub const DEFAULT_REPLY_MARKER: &str = "- Please type your reply above this line -";

/// Default number of trailing lines joined when looking for a wrapped header
pub const DEFAULT_LINE_WINDOW: usize = 2;

/// Upper bound for the line window
pub const MAX_LINE_WINDOW: usize = 8;

/// Regexes for attribution lines written by common clients
const DEFAULT_TEXT_PATTERNS: &[&str] = &[
    r"^\s*On\s.+wrote:\s*$",
    r"(?i)^\s*-{2,}\s*Original Message\s*-{2,}",
    r"^\s*From:\s.+Sent:\s",
    r"^\s*_{20,}\s*$",
    r"^\s*Le\s.+a\s+écrit\s*:\s*$",
    r"^\s*Am\s.+schrieb\s.*:\s*$",
];

/// Iterate every element below the document root, in document order
pub(crate) fn elements(document: &Html) -> impl Iterator<Item = ElementRef<'_>> {
    document
        .root_element()
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
}

/// A single attribute condition of a [`TagPattern`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeFilter {
    /// The element's class list contains this class
    Class(String),

    /// The attribute is present with exactly this value
    Equals { name: String, value: String },
}

impl AttributeFilter {
    fn matches(&self, element: &scraper::node::Element) -> bool {
        match self {
            Self::Class(class) => element.classes().any(|c| c == class),
            Self::Equals { name, value } => element.attr(name) == Some(value.as_str()),
        }
    }
}

/// Tag name plus attribute conditions, all of which must hold
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPattern {
    tag: String,
    filters: Vec<AttributeFilter>,
}

impl TagPattern {
    pub fn new(tag: impl Into<String>) -> ConfigResult<Self> {
        let tag = tag.into().trim().to_ascii_lowercase();
        if tag.is_empty() {
            return Err(ConfigError::EmptyTag);
        }
        Ok(Self {
            tag,
            filters: Vec::new(),
        })
    }

    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.filters.push(AttributeFilter::Class(class.into()));
        self
    }

    #[must_use]
    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.with_attr("id", id)
    }

    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push(AttributeFilter::Equals {
            name: name.into().to_ascii_lowercase(),
            value: value.into(),
        });
        self
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn filters(&self) -> &[AttributeFilter] {
        &self.filters
    }

    fn matches(&self, element: &scraper::node::Element) -> bool {
        element.name() == self.tag && self.filters.iter().all(|f| f.matches(element))
    }

    /// First element in document order satisfying the pattern
    #[must_use]
    pub fn find<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        elements(document).find(|el| self.matches(el.value()))
    }
}

impl fmt::Display for TagPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        for filter in &self.filters {
            match filter {
                AttributeFilter::Class(class) => write!(f, " class~={class:?}")?,
                AttributeFilter::Equals { name, value } => write!(f, " {name}={value:?}")?,
            }
        }
        write!(f, ">")
    }
}

/// Signature of a hand-written boundary finder
pub type FindFn = for<'a> fn(&'a Html) -> Option<ElementRef<'a>>;

/// A named boundary finder for markers that attribute filters cannot express
#[derive(Clone, Copy)]
pub struct HtmlPredicate {
    name: &'static str,
    find: FindFn,
}

impl HtmlPredicate {
    #[must_use]
    pub const fn new(name: &'static str, find: FindFn) -> Self {
        Self { name, find }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn find<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        (self.find)(document)
    }

    /// Look up one of the predicates shipped with this crate
    #[must_use]
    pub fn named(name: &str) -> Option<Self> {
        match name {
            "outlook_quoted_header" => Some(OUTLOOK_QUOTED_HEADER),
            _ => None,
        }
    }
}

impl fmt::Debug for HtmlPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HtmlPredicate").field(&self.name).finish()
    }
}

/// Outlook 2016 separates the quoted message with a borderless div that only
/// draws a solid top border, directly above the From/Sent header block.
pub const OUTLOOK_QUOTED_HEADER: HtmlPredicate =
    HtmlPredicate::new("outlook_quoted_header", find_outlook_quoted_header);

fn find_outlook_quoted_header(document: &Html) -> Option<ElementRef<'_>> {
    elements(document).find(|el| {
        el.value().name() == "div"
            && el
                .value()
                .attr("style")
                .is_some_and(is_outlook_separator_style)
    })
}

fn is_outlook_separator_style(style: &str) -> bool {
    let compact: String = style
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();
    compact.contains("border:none") && compact.contains("border-top:solid")
}

/// One entry of an [`HtmlPatternList`]
#[derive(Debug, Clone)]
pub enum HtmlMatcher {
    /// Tag name and attribute conditions
    Structural(TagPattern),

    /// Hand-written finder
    Custom(HtmlPredicate),
}

impl HtmlMatcher {
    #[must_use]
    pub fn find<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        match self {
            Self::Structural(pattern) => pattern.find(document),
            Self::Custom(predicate) => predicate.find(document),
        }
    }
}

impl From<TagPattern> for HtmlMatcher {
    fn from(pattern: TagPattern) -> Self {
        Self::Structural(pattern)
    }
}

impl From<HtmlPredicate> for HtmlMatcher {
    fn from(predicate: HtmlPredicate) -> Self {
        Self::Custom(predicate)
    }
}

impl fmt::Display for HtmlMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structural(pattern) => write!(f, "{pattern}"),
            Self::Custom(predicate) => write!(f, "{}()", predicate.name()),
        }
    }
}

/// Build a structural matcher from constant parts
fn builtin_tag(tag: &str, filters: &[(&str, &str)]) -> HtmlMatcher {
    let pattern = filters.iter().fold(
        TagPattern {
            tag: tag.to_string(),
            filters: Vec::new(),
        },
        |pattern, (name, value)| match *name {
            "class" => pattern.with_class(*value),
            _ => pattern.with_attr(*name, *value),
        },
    );
    HtmlMatcher::Structural(pattern)
}

/// Markers left by the mail clients we know about, most specific first
#[must_use]
pub fn builtin_html_matchers() -> Vec<HtmlMatcher> {
    vec![
        // gmail
        builtin_tag("div", &[("class", "gmail_extra")]),
        // outlook ios
        builtin_tag("div", &[("class", "gmail_quote")]),
        // outlook 2016; kept ahead of the _MailEndCompose anchor, which can
        // leave nothing but an empty wrapper behind
        HtmlMatcher::Custom(OUTLOOK_QUOTED_HEADER),
        // outlook
        builtin_tag("a", &[("name", "_MailEndCompose")]),
        // outlook for mac
        builtin_tag("span", &[("id", "OLK_SRC_BODY_SECTION")]),
        // outlook.com
        builtin_tag("hr", &[]),
    ]
}

/// Ordered HTML matchers: external entries first, then the built-in ones
#[derive(Debug, Clone)]
pub struct HtmlPatternList {
    matchers: Vec<HtmlMatcher>,
}

impl HtmlPatternList {
    /// Prepend `external` to the built-in matchers
    #[must_use]
    pub fn with_external(external: Vec<HtmlMatcher>) -> Self {
        let mut matchers = external;
        matchers.extend(builtin_html_matchers());
        Self { matchers }
    }

    /// Exactly the given matchers, without the built-in list
    #[must_use]
    pub const fn from_matchers(matchers: Vec<HtmlMatcher>) -> Self {
        Self { matchers }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HtmlMatcher> {
        self.matchers.iter()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.matchers.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

impl Default for HtmlPatternList {
    fn default() -> Self {
        Self::with_external(Vec::new())
    }
}

impl<'a> IntoIterator for &'a HtmlPatternList {
    type Item = &'a HtmlMatcher;
    type IntoIter = std::slice::Iter<'a, HtmlMatcher>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Compiled regex searched against a window of joined lines
#[derive(Debug, Clone)]
pub struct TextPattern(Regex);

impl TextPattern {
    pub fn new(pattern: &str) -> ConfigResult<Self> {
        Regex::new(pattern)
            .map(Self)
            .map_err(|source| ConfigError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    #[must_use]
    pub fn is_match(&self, haystack: &str) -> bool {
        self.0.is_match(haystack)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Regex> for TextPattern {
    fn from(regex: Regex) -> Self {
        Self(regex)
    }
}

/// Ordered text patterns; order only breaks ties between equal offsets
#[derive(Debug, Clone, Default)]
pub struct TextPatternList(Vec<TextPattern>);

impl TextPatternList {
    /// Compile every pattern, failing on the first invalid one
    pub fn compile<I, S>(patterns: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        patterns
            .into_iter()
            .map(|p| TextPattern::new(p.as_ref()))
            .collect::<ConfigResult<Vec<_>>>()
            .map(Self)
    }

    /// Attribution patterns for common clients
    #[must_use]
    pub fn defaults() -> Self {
        static DEFAULTS: std::sync::LazyLock<TextPatternList> = std::sync::LazyLock::new(|| {
            TextPatternList::compile(DEFAULT_TEXT_PATTERNS)
                .expect("built-in text patterns are valid")
        });
        DEFAULTS.clone()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TextPattern> {
        self.0.iter()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<TextPattern>> for TextPatternList {
    fn from(patterns: Vec<TextPattern>) -> Self {
        Self(patterns)
    }
}

impl<'a> IntoIterator for &'a TextPatternList {
    type Item = &'a TextPattern;
    type IntoIter = std::slice::Iter<'a, TextPattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// How many trailing lines are joined when testing text patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineWindow(usize);

impl LineWindow {
    pub const fn new(lines: usize) -> ConfigResult<Self> {
        if lines == 0 || lines > MAX_LINE_WINDOW {
            return Err(ConfigError::InvalidLineWindow {
                value: lines,
                max: MAX_LINE_WINDOW,
            });
        }
        Ok(Self(lines))
    }

    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl Default for LineWindow {
    fn default() -> Self {
        Self(DEFAULT_LINE_WINDOW)
    }
}
