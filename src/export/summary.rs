//! Human- and machine-readable summaries of a converted message.
//!
//! The summary carries everything in the model except attachment contents.

use std::io::Write;

use chrono::{DateTime, Utc};
use humansize::{format_size, BINARY};

use crate::model::address::Identity;
use crate::model::mail::{
    BodyContent, Importance, MessageModel, Priority, RecipientEntry, RecipientKind,
};

/// Attachment metadata without its bytes.
#[derive(Debug, serde::Serialize)]
pub struct AttachmentSummary<'a> {
    pub filename: &'a str,
    pub content_id: Option<&'a str>,
    pub is_inline: bool,
    pub bytes: usize,
}

/// Serializable view of a [`MessageModel`].
#[derive(Debug, serde::Serialize)]
pub struct MessageSummary<'a> {
    pub sender: &'a Identity,
    pub representing: &'a Identity,
    pub subject: &'a str,
    pub priority: Priority,
    pub importance: Importance,
    pub sent_on: Option<DateTime<Utc>>,
    pub internet_message_id: Option<&'a str>,
    pub transport_headers: &'a str,
    pub body: &'a BodyContent,
    pub recipients: &'a [RecipientEntry],
    pub attachments: Vec<AttachmentSummary<'a>>,
}

impl<'a> MessageSummary<'a> {
    pub fn of(model: &'a MessageModel) -> Self {
        Self {
            sender: &model.sender,
            representing: &model.representing,
            subject: &model.subject,
            priority: model.priority,
            importance: model.importance,
            sent_on: model.sent_on,
            internet_message_id: model.internet_message_id.as_deref(),
            transport_headers: &model.transport_headers,
            body: &model.body,
            recipients: &model.recipients,
            attachments: model
                .attachments
                .iter()
                .map(|a| AttachmentSummary {
                    filename: &a.filename,
                    content_id: a.content_id.as_deref(),
                    is_inline: a.is_inline,
                    bytes: a.len(),
                })
                .collect(),
        }
    }
}

/// Write the summary as pretty-printed JSON.
pub fn write_json(model: &MessageModel, out: &mut dyn Write) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, &MessageSummary::of(model))?;
    writeln!(out)?;
    Ok(())
}

/// Write a short aligned table for terminal display.
pub fn write_table(model: &MessageModel, out: &mut dyn Write) -> anyhow::Result<()> {
    let sent_on = model
        .sent_on
        .map(|d| d.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "-".to_string());

    writeln!(out)?;
    writeln!(out, "  {:<18} {}", "Subject", model.subject)?;
    writeln!(out, "  {:<18} {}", "Sender", model.sender)?;
    if model.representing != model.sender {
        writeln!(out, "  {:<18} {}", "On behalf of", model.representing)?;
    }
    writeln!(out, "  {:<18} {}", "Sent", sent_on)?;
    writeln!(
        out,
        "  {:<18} {}",
        "Message-ID",
        model.internet_message_id.as_deref().unwrap_or("-")
    )?;
    writeln!(out, "  {:<18} {:?}", "Priority", model.priority)?;
    writeln!(out, "  {:<18} {:?}", "Importance", model.importance)?;
    writeln!(
        out,
        "  {:<18} {} plain / {} html",
        "Body",
        format_size(model.body.plain.len(), BINARY),
        format_size(model.body.html.len(), BINARY)
    )?;

    writeln!(out)?;
    writeln!(out, "  Recipients ({}):", model.recipients.len())?;
    for kind in [RecipientKind::To, RecipientKind::Cc, RecipientKind::Bcc] {
        for r in model.recipients_of(kind) {
            let who = Identity::new(r.address.clone(), r.display_name.clone());
            writeln!(out, "    {:<4} {}", kind, who)?;
        }
    }

    writeln!(out)?;
    writeln!(out, "  Attachments ({}):", model.attachments.len())?;
    for a in &model.attachments {
        let inline = match (&a.content_id, a.is_inline) {
            (Some(cid), true) => format!(" [inline cid:{cid}]"),
            _ => String::new(),
        };
        writeln!(
            out,
            "    {:<40} {:>10}{}",
            a.filename,
            format_size(a.len(), BINARY),
            inline
        )?;
    }
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::attachment::AttachmentRecord;

    fn model() -> MessageModel {
        MessageModel {
            sender: Identity::new("alice@x.com", "Alice"),
            representing: Identity::new("alice@x.com", "Alice"),
            subject: "Hello".into(),
            priority: Priority::Normal,
            importance: Importance::High,
            sent_on: None,
            internet_message_id: None,
            transport_headers: String::new(),
            body: BodyContent::default(),
            recipients: Vec::new(),
            attachments: vec![AttachmentRecord::new(
                vec![0; 2048],
                "logo.png".into(),
                Some("logo".into()),
                true,
            )],
        }
    }

    #[test]
    fn test_json_omits_contents() {
        let mut buf = Vec::new();
        write_json(&model(), &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        let att = &value["attachments"][0];
        assert_eq!(att["filename"], "logo.png");
        assert_eq!(att["bytes"], 2048);
        assert!(att.get("content").is_none());
        assert_eq!(value["importance"], "High");
    }

    #[test]
    fn test_table_lists_attachments() {
        let mut buf = Vec::new();
        write_table(&model(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("logo.png"));
        assert!(text.contains("cid:logo"));
        assert!(text.contains("Alice <alice@x.com>"));
    }

    #[test]
    fn test_table_groups_recipients_by_kind() {
        let mut m = model();
        m.recipients = vec![
            RecipientEntry {
                address: "cc@x.com".into(),
                display_name: String::new(),
                kind: RecipientKind::Cc,
            },
            RecipientEntry {
                address: "to@x.com".into(),
                display_name: "To Person".into(),
                kind: RecipientKind::To,
            },
        ];
        let mut buf = Vec::new();
        write_table(&m, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let to = text.find("To   To Person <to@x.com>").unwrap();
        let cc = text.find("Cc   cc@x.com").unwrap();
        assert!(to < cc);
    }
}
