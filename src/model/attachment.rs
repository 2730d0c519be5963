//! Extracted attachments.
//!
//! Unlike the source body parts, an attachment record owns its bytes: the
//! payload is copied out of the parsed message during classification.

/// One non-body part extracted from the source message.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AttachmentRecord {
    /// Decoded content of the part.
    pub content: Vec<u8>,

    /// Assigned filename. Never empty once the namer has run.
    pub filename: String,

    /// Content-ID used to reference the part from HTML markup.
    pub content_id: Option<String>,

    /// `true` only for inline parts that carry a content-id.
    pub is_inline: bool,

    /// Size in bytes, or [`AttachmentRecord::UNKNOWN_SIZE`] until the
    /// container writer records it.
    pub size: i64,
}

impl AttachmentRecord {
    /// Sentinel for "size not yet determined".
    pub const UNKNOWN_SIZE: i64 = -1;

    pub fn new(
        content: Vec<u8>,
        filename: String,
        content_id: Option<String>,
        is_inline: bool,
    ) -> Self {
        Self {
            content,
            filename,
            content_id,
            is_inline,
            size: Self::UNKNOWN_SIZE,
        }
    }

    /// Byte length of the content, regardless of the recorded `size`.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
