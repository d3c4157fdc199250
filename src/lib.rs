// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Reply Content Extraction
//!
//! Pulls the newly written part out of a reply email and drops the quoted
//! conversation that mail clients attach below it.
//!
//! # Strategy
//!
//! - HTML bodies are cut at the first structural marker left by a known
//!   client (Gmail and the various Outlook flavors), with externally
//!   configured markers taking priority
//! - Plain text bodies are cut at an explicit reply marker or at the first
//!   attribution line ("On ... wrote:"), even when the client hard-wrapped it
//! - Plain text is escaped and converted to markup so both pathways return
//!   the same kind of content
//!
//! # Example
//!
//! ```rust
//! use email_reply_extract::{EmailBody, extract_reply};
//!
//! let body = EmailBody::text("Sounds good!\n\nOn Mon, Jan 6, 2025 Bob wrote:\n> Lunch?");
//! let reply = extract_reply(&body);
//!
//! assert_eq!(reply, "Sounds&nbsp;good!<br>");
//! ```

mod config;
mod error;
mod extractor;
mod html;
mod parser;
mod patterns;
mod text;
mod types;

pub use config::{ExtractorConfig, HtmlPatternConfig};
pub use error::{ConfigError, ConfigResult, ParseError, Result};
pub use extractor::{ReplyExtractor, extract_reply};
pub use html::strip_quoted_html;
pub use parser::parse_body;
pub use patterns::*;
pub use text::{normalize_lines, split_lines, strip_quoted_text};
pub use types::*;
