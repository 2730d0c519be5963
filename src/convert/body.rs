//! Body resolution and body-part classification.
//!
//! Every leaf part of the source is visited once, in document order, and ends
//! up in exactly one of three places: nowhere (it *is* the canonical body),
//! appended to the body (an inline text fragment nobody can reference), or
//! in the attachment list.

use tracing::debug;

use crate::convert::naming::{self, NamelessCounter};
use crate::model::attachment::AttachmentRecord;
use crate::model::mail::BodyContent;
use crate::model::source::{BodyPart, PartKind, SourceMessage};

/// Extension forced onto attached messages.
pub const MESSAGE_EXTENSION: &str = ".eml";

/// Extension forced onto delivery-status reports.
pub const TEXT_EXTENSION: &str = ".txt";

/// Fixed provisional name of delivery-status reports.
pub const DELIVERY_STATUS_NAME: &str = "details";

/// What to do with one body part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The part is the canonical plain or HTML body; already captured.
    Canonical,
    /// Inline text without a content-id: fold it into the body.
    Fragment(String),
    /// Extract as an attachment.
    Attachment(Extracted),
}

/// An attachment before naming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub content: Vec<u8>,
    pub provisional_name: Option<String>,
    pub forced_extension: Option<&'static str>,
    pub content_id: Option<String>,
    pub is_inline: bool,
}

/// The canonical bodies that text parts are matched against.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalBodies<'a> {
    pub text: Option<&'a str>,
    pub html: Option<&'a str>,
}

impl<'a> CanonicalBodies<'a> {
    pub fn of(source: &'a SourceMessage) -> Self {
        Self {
            text: source.text_body.as_deref(),
            html: source.html_body.as_deref(),
        }
    }

    fn matches(&self, text: &str) -> bool {
        self.text == Some(text) || self.html == Some(text)
    }
}

/// Seed the model body from the source's canonical bodies.
pub fn resolve_body(source: &SourceMessage) -> BodyContent {
    BodyContent {
        plain: source.text_body.clone().unwrap_or_default(),
        html: source.html_body.clone().unwrap_or_default(),
    }
}

/// Decide what a single part is.
pub fn classify(part: &BodyPart, canonical: &CanonicalBodies<'_>) -> Classification {
    match &part.kind {
        PartKind::Text { text } => classify_text(part, text, canonical),
        PartKind::NestedMessage { subject } => Classification::Attachment(extract(
            part,
            subject.clone(),
            Some(MESSAGE_EXTENSION),
        )),
        PartKind::DispositionNotification => {
            Classification::Attachment(extract(part, part.filename.clone(), None))
        }
        PartKind::DeliveryStatus => Classification::Attachment(extract(
            part,
            Some(DELIVERY_STATUS_NAME.to_string()),
            Some(TEXT_EXTENSION),
        )),
        PartKind::Generic => {
            Classification::Attachment(extract(part, part.filename.clone(), None))
        }
    }
}

fn classify_text(part: &BodyPart, text: &str, canonical: &CanonicalBodies<'_>) -> Classification {
    if canonical.matches(text) {
        Classification::Canonical
    } else if part.is_inline() && !part.has_content_id() {
        Classification::Fragment(text.to_string())
    } else {
        Classification::Attachment(extract(part, part.filename.clone(), None))
    }
}

fn extract(
    part: &BodyPart,
    provisional_name: Option<String>,
    forced_extension: Option<&'static str>,
) -> Extracted {
    Extracted {
        content: part.payload.clone(),
        provisional_name,
        forced_extension,
        content_id: part.content_id.clone(),
        // An inline part nobody can reference by id behaves as a plain attachment
        is_inline: part.is_inline() && part.has_content_id(),
    }
}

/// Append an inline text fragment to both body renderings.
pub fn append_fragment(body: &mut BodyContent, text: &str) {
    body.plain.push('\n');
    body.plain.push_str(text);
    body.html.push_str(&text.replace("\r\n", "<br>").replace('\n', "<br>"));
}

/// Walk all parts, updating `body` and returning the named attachments.
pub fn classify_parts(
    parts: &[BodyPart],
    canonical: &CanonicalBodies<'_>,
    body: &mut BodyContent,
) -> Vec<AttachmentRecord> {
    let mut attachments = Vec::new();
    let mut counter = NamelessCounter::default();

    for (idx, part) in parts.iter().enumerate() {
        match classify(part, canonical) {
            Classification::Canonical => {
                debug!(part = idx, content_type = %part.content_type, "Skipping canonical body");
            }
            Classification::Fragment(text) => {
                debug!(part = idx, len = text.len(), "Merging inline text into body");
                append_fragment(body, &text);
            }
            Classification::Attachment(extracted) => {
                let (filename, next) = naming::assign_filename(
                    extracted.provisional_name.as_deref(),
                    extracted.forced_extension,
                    counter,
                );
                counter = next;
                debug!(
                    part = idx,
                    filename = %filename,
                    inline = extracted.is_inline,
                    bytes = extracted.content.len(),
                    "Extracted attachment"
                );
                attachments.push(AttachmentRecord::new(
                    extracted.content,
                    filename,
                    extracted.content_id,
                    extracted.is_inline,
                ));
            }
        }
    }

    debug!(
        attachments = attachments.len(),
        nameless = counter.count(),
        "Classified body parts"
    );
    attachments
}
