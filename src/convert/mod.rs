//! MIME → message model conversion.
//!
//! ```text
//! SourceMessage ──┬─ identity ───────┐
//!                 ├─ priority ───────┤
//!                 ├─ recipients ─────┼─▶ assemble ─▶ MessageModel ─▶ ContainerWriter
//!                 ├─ body (classify) ┤
//!                 └─ raw headers ────┘
//! ```
//!
//! Conversion is a single synchronous pass with no state shared between calls.

pub mod body;
pub mod identity;
pub mod naming;
pub mod priority;
pub mod recipients;

use std::path::Path;

use tracing::info;

use crate::container::ContainerWriter;
use crate::error::{ConvertError, Result};
use crate::model::address::Identity;
use crate::model::attachment::AttachmentRecord;
use crate::model::mail::{BodyContent, MessageModel, RecipientEntry};
use crate::model::source::SourceMessage;
use crate::parser::{eml, mime};

/// Load an `.eml` file and convert it.
pub fn convert_eml_to_model(eml_path: impl AsRef<Path>) -> Result<MessageModel> {
    let source = eml::load_eml(eml_path.as_ref())?;
    convert_source(&source)
}

/// Load a message held in memory and convert it.
pub fn convert_bytes(raw_message: &[u8]) -> Result<MessageModel> {
    let source = mime::load_source(raw_message)?;
    convert_source(&source)
}

/// Convert an `.eml` file and persist the result with `writer`.
pub fn convert_eml_to_msg(
    eml_path: impl AsRef<Path>,
    out_path: impl AsRef<Path>,
    writer: &dyn ContainerWriter,
) -> Result<MessageModel> {
    let eml_path = eml_path.as_ref();
    let out_path = out_path.as_ref();
    let model = convert_eml_to_model(eml_path)?;
    writer.save(&model, out_path)?;
    info!(
        input = %eml_path.display(),
        output = %out_path.display(),
        attachments = model.attachments.len(),
        "Converted message"
    );
    Ok(model)
}

/// Convert a message container back to MIME.
///
/// Not available: always fails without touching either path.
pub fn convert_msg_to_eml(_msg_path: impl AsRef<Path>, _eml_path: impl AsRef<Path>) -> Result<()> {
    Err(ConvertError::UnsupportedDirection)
}

/// Convert an already-loaded source message.
pub fn convert_source(source: &SourceMessage) -> Result<MessageModel> {
    // Fails before anything else is computed when no sender can be resolved
    let representing = identity::resolve_representing(&source.from, source.resent_sender.as_ref())?;
    let sender = identity::resolve_sender(&source.from);

    let recipients = recipients::collect_recipients(&source.to, &source.cc, &source.bcc);

    let mut body = body::resolve_body(source);
    let canonical = body::CanonicalBodies::of(source);
    let attachments = body::classify_parts(&source.parts, &canonical, &mut body);

    Ok(assemble(
        source,
        (sender, representing),
        body,
        recipients,
        attachments,
    ))
}

/// Build the final model. Pure composition; every fallible step ran before.
fn assemble(
    source: &SourceMessage,
    (sender, representing): (Identity, Identity),
    body: BodyContent,
    recipients: Vec<RecipientEntry>,
    attachments: Vec<AttachmentRecord>,
) -> MessageModel {
    MessageModel {
        sender,
        representing,
        subject: source.subject.clone().unwrap_or_default(),
        priority: priority::map_priority(&source.priority).unwrap_or_default(),
        importance: priority::map_importance(&source.importance).unwrap_or_default(),
        sent_on: source.date,
        internet_message_id: source.message_id.clone(),
        transport_headers: source.raw_headers.clone(),
        body,
        recipients,
        attachments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::address::EmailAddress;
    use crate::model::mail::{Priority, RecipientKind};
    use crate::model::source::{BodyPart, PartKind, SourcePriority};

    fn basic_source() -> SourceMessage {
        SourceMessage {
            from: vec![EmailAddress::new("alice@x.com", "")],
            to: vec![EmailAddress::new("bob@y.com", "")],
            priority: SourcePriority::Urgent,
            text_body: Some("Hi".into()),
            raw_headers: "From: alice@x.com\r\nTo: bob@y.com\r\n".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_basic_scenario() {
        let model = convert_source(&basic_source()).unwrap();
        assert_eq!(model.sender.address, "alice@x.com");
        assert_eq!(model.representing, model.sender);
        assert_eq!(model.recipients.len(), 1);
        assert_eq!(model.recipients[0].address, "bob@y.com");
        assert_eq!(model.recipients[0].kind, RecipientKind::To);
        assert_eq!(model.priority, Priority::Urgent);
        assert_eq!(model.body.plain, "Hi");
        assert_eq!(model.transport_headers, "From: alice@x.com\r\nTo: bob@y.com\r\n");
    }

    #[test]
    fn test_missing_sender_fails_whole_conversion() {
        let source = SourceMessage {
            from: Vec::new(),
            ..basic_source()
        };
        assert!(matches!(
            convert_source(&source),
            Err(ConvertError::MissingSender)
        ));
    }

    #[test]
    fn test_inline_image_with_cid() {
        let source = SourceMessage {
            parts: vec![BodyPart {
                kind: PartKind::Generic,
                content_type: "image/png".into(),
                filename: None,
                content_id: Some("img1".into()),
                disposition: Some("inline".into()),
                payload: vec![1, 2, 3],
            }],
            ..basic_source()
        };
        let model = convert_source(&source).unwrap();
        assert_eq!(model.attachments.len(), 1);
        assert!(model.attachments[0].is_inline);
        assert_eq!(model.attachments[0].content_id.as_deref(), Some("img1"));
        assert_eq!(model.inline_attachments().count(), 1);
    }

    #[test]
    fn test_reverse_direction_unsupported() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("out.eml");
        let err = convert_msg_to_eml(tmp.path().join("in.msgm"), &out).unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedDirection));
        assert!(!out.exists());
    }
}
