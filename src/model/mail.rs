//! The assembled message model handed to a container writer.

use chrono::{DateTime, Utc};

use super::address::Identity;
use super::attachment::AttachmentRecord;

/// Message priority in the model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Priority {
    NonUrgent,
    #[default]
    Normal,
    Urgent,
}

/// Message importance in the model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Importance {
    Low,
    #[default]
    Normal,
    High,
}

/// Which address header a recipient came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RecipientKind {
    To,
    Cc,
    Bcc,
}

impl std::fmt::Display for RecipientKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RecipientKind::To => "To",
            RecipientKind::Cc => "Cc",
            RecipientKind::Bcc => "Bcc",
        };
        f.pad(s)
    }
}

/// One addressee of the message.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RecipientEntry {
    pub address: String,
    pub display_name: String,
    pub kind: RecipientKind,
}

/// Canonical message text.
///
/// Inline text fragments found during classification are appended to both
/// fields; neither is ever replaced once seeded.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BodyContent {
    /// Plain-text body (empty if the source has no `text/plain` body).
    pub plain: String,
    /// HTML body (empty if the source has no `text/html` body).
    pub html: String,
}

/// The complete conversion result.
///
/// Built once by [`crate::convert::convert_source`] and not mutated afterwards.
/// Attachment sizes stay unknown here; only the copy stored by the container
/// writer records them.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MessageModel {
    /// The mailbox that sent the message (first `From:` entry).
    pub sender: Identity,

    /// The mailbox the message was sent on behalf of.
    pub representing: Identity,

    /// Decoded subject line (empty if absent).
    pub subject: String,

    pub priority: Priority,

    pub importance: Importance,

    /// Parsed `Date:` header, converted to UTC.
    pub sent_on: Option<DateTime<Utc>>,

    /// The `Message-ID` header value without angle brackets.
    pub internet_message_id: Option<String>,

    /// The original top-level header block, verbatim.
    pub transport_headers: String,

    pub body: BodyContent,

    /// To, then Cc, then Bcc recipients, each block in header order.
    pub recipients: Vec<RecipientEntry>,

    /// Extracted attachments in encounter order.
    pub attachments: Vec<AttachmentRecord>,
}

impl MessageModel {
    /// Recipients of a single kind, in order.
    pub fn recipients_of(&self, kind: RecipientKind) -> impl Iterator<Item = &RecipientEntry> {
        self.recipients.iter().filter(move |r| r.kind == kind)
    }

    /// Attachments referenced from the HTML body by content-id.
    pub fn inline_attachments(&self) -> impl Iterator<Item = &AttachmentRecord> {
        self.attachments.iter().filter(|a| a.is_inline)
    }
}
