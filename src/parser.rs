//! Decoding of raw messages into an [`EmailBody`]

use crate::error::{ParseError, Result};
use crate::types::EmailBody;
use tracing::debug;

/// Parse raw email bytes and keep the first text and HTML parts
pub fn parse_body(raw: &[u8]) -> Result<EmailBody> {
    let parsed = mailparse::parse_mail(raw).map_err(|e| ParseError::Structure(e.to_string()))?;

    let mut body = EmailBody::default();

    if parsed.subparts.is_empty() {
        collect_single(&parsed, &mut body);
    } else {
        collect_recursive(&parsed, &mut body);
    }

    debug!(
        has_html = body.html.is_some(),
        has_text = body.text.is_some(),
        "Decoded email body"
    );

    Ok(body)
}

/// A message without subparts is its own body; anything but HTML counts as text
fn collect_single(parsed: &mailparse::ParsedMail, body: &mut EmailBody) {
    let content_type = parsed.ctype.mimetype.to_lowercase();

    if let Some(decoded) = decode(parsed) {
        if content_type.contains("text/html") {
            body.html = Some(decoded);
        } else {
            body.text = Some(decoded);
        }
    }
}

fn collect_recursive(parsed: &mailparse::ParsedMail, body: &mut EmailBody) {
    for part in &parsed.subparts {
        if part.subparts.is_empty() {
            collect_leaf(part, body);
        } else {
            collect_recursive(part, body);
        }
    }
}

fn collect_leaf(part: &mailparse::ParsedMail, body: &mut EmailBody) {
    let content_type = part.ctype.mimetype.to_lowercase();

    // Attachments that happen to be text/* are not the message body
    if is_attachment(part) {
        return;
    }

    let slot = if content_type.contains("text/html") {
        &mut body.html
    } else if content_type.contains("text/plain") {
        &mut body.text
    } else {
        return;
    };

    if slot.is_none() {
        *slot = decode(part);
    }
}

/// Decoded part body; a part that fails to decode is skipped
fn decode(part: &mailparse::ParsedMail) -> Option<String> {
    part.get_body()
        .map_err(|e| {
            debug!(
                content_type = %part.ctype.mimetype,
                error = %e,
                "Skipping body part that failed to decode"
            );
        })
        .ok()
}

fn is_attachment(part: &mailparse::ParsedMail) -> bool {
    matches!(
        part.get_content_disposition().disposition,
        mailparse::DispositionType::Attachment
    )
}
