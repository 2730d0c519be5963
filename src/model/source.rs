//! The loaded source document: what the MIME loader exposes to the converter.
//!
//! Everything here is owned, so a [`SourceMessage`] can be built by hand in
//! tests or produced by [`crate::parser::mime::load_source`].

use chrono::{DateTime, Utc};

use super::address::EmailAddress;

/// Priority as declared by the source `Priority:` header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SourcePriority {
    NonUrgent,
    #[default]
    Normal,
    Urgent,
    /// A header value outside the known set, kept verbatim.
    Unrecognized(String),
}

/// Importance as declared by the source `Importance:` header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SourceImportance {
    Low,
    #[default]
    Normal,
    High,
    Unrecognized(String),
}

/// Content kind of a body part, with the data specific to that kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartKind {
    /// Any `text/*` part. `text` is the decoded, charset-converted content.
    Text { text: String },
    /// An attached `message/rfc822` (or `message/global`) message.
    NestedMessage { subject: Option<String> },
    /// A `message/disposition-notification` report.
    DispositionNotification,
    /// A `message/delivery-status` report.
    DeliveryStatus,
    /// Everything else (images, application data, ...).
    Generic,
}

/// One leaf of the MIME tree (multipart containers are not listed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyPart {
    pub kind: PartKind,

    /// `type/subtype`, lowercase (e.g. `"image/png"`).
    pub content_type: String,

    /// Declared filename (`Content-Disposition` filename or `Content-Type` name).
    pub filename: Option<String>,

    /// `Content-ID` without angle brackets.
    pub content_id: Option<String>,

    /// Disposition type (`"inline"`, `"attachment"`), as written.
    pub disposition: Option<String>,

    /// Transfer-decoded payload. For nested messages this is the complete
    /// nested message, headers included.
    pub payload: Vec<u8>,
}

impl BodyPart {
    /// `true` if the part carries an `inline` content disposition.
    pub fn is_inline(&self) -> bool {
        self.disposition
            .as_deref()
            .is_some_and(|d| d.trim().eq_ignore_ascii_case("inline"))
    }

    /// `true` if the part has a non-empty content-id.
    pub fn has_content_id(&self) -> bool {
        self.content_id.as_deref().is_some_and(|id| !id.is_empty())
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}

/// A parsed MIME message, reduced to what the conversion needs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceMessage {
    pub from: Vec<EmailAddress>,
    pub to: Vec<EmailAddress>,
    pub cc: Vec<EmailAddress>,
    pub bcc: Vec<EmailAddress>,
    pub resent_sender: Option<EmailAddress>,

    pub subject: Option<String>,

    /// Canonical `text/plain` body, if the message has one.
    pub text_body: Option<String>,
    /// Canonical `text/html` body, if the message has one.
    pub html_body: Option<String>,

    /// Top-level header block, verbatim.
    pub raw_headers: String,

    pub date: Option<DateTime<Utc>>,
    pub message_id: Option<String>,
    pub priority: SourcePriority,
    pub importance: SourceImportance,

    /// Leaf body parts in document order.
    pub parts: Vec<BodyPart>,
}
