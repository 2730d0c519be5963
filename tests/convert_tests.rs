//! Integration tests for loading, converting and persisting `.eml` fixtures.

use std::path::Path;

use assert_fs::prelude::*;
use predicates::prelude::*;

use emlmsg::container::reader::read_container;
use emlmsg::container::MsgmWriter;
use emlmsg::model::mail::{Importance, Priority, RecipientKind};
use emlmsg::{convert_eml_to_model, convert_eml_to_msg, convert_msg_to_eml, ConvertError};

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

// ─── Simple message: identities, priority, body ─────────────────────

#[test]
fn test_simple_message() {
    let model = convert_eml_to_model(fixture("simple.eml")).unwrap();
    assert_eq!(model.sender.address, "alice@x.com");
    assert_eq!(model.sender.display_name, "Alice");
    assert_eq!(model.representing, model.sender);
    assert_eq!(model.subject, "Greeting");
    assert_eq!(model.priority, Priority::Urgent);
    assert_eq!(model.importance, Importance::High);
    assert_eq!(model.body.plain.trim_end(), "Hi");
    assert!(model.body.html.is_empty());
    assert!(model.attachments.is_empty(), "canonical body must not be attached");

    assert_eq!(model.recipients.len(), 1);
    assert_eq!(model.recipients[0].address, "bob@y.com");
    assert_eq!(model.recipients[0].kind, RecipientKind::To);

    assert_eq!(model.internet_message_id.as_deref(), Some("greet001@x.com"));
    let sent = model.sent_on.expect("Date header should parse");
    assert_eq!(sent.to_rfc3339(), "2024-01-04T10:00:00+00:00");
}

#[test]
fn test_transport_headers_verbatim() {
    let model = convert_eml_to_model(fixture("simple.eml")).unwrap();
    assert!(model
        .transport_headers
        .starts_with("From: Alice <alice@x.com>\r\nTo: bob@y.com\r\n"));
    assert!(model.transport_headers.ends_with("charset=utf-8\r\n"));
    assert!(!model.transport_headers.contains("Hi"));
}

// ─── Inline image with content-id ───────────────────────────────────

#[test]
fn test_inline_image() {
    let model = convert_eml_to_model(fixture("inline_image.eml")).unwrap();
    assert!(model.body.plain.is_empty());
    assert!(model.body.html.contains("cid:img1"));

    assert_eq!(model.attachments.len(), 1, "HTML body is not an attachment");
    let img = &model.attachments[0];
    assert!(img.is_inline);
    assert_eq!(img.content_id.as_deref(), Some("img1"));
    assert_eq!(img.filename, "Nameless");
    assert!(img.content.starts_with(b"\x89PNG"));
}

#[test]
fn test_recipient_blocks_in_order() {
    let model = convert_eml_to_model(fixture("inline_image.eml")).unwrap();
    let got: Vec<(&str, RecipientKind)> = model
        .recipients
        .iter()
        .map(|r| (r.address.as_str(), r.kind))
        .collect();
    assert_eq!(
        got,
        vec![
            ("bob@y.com", RecipientKind::To),
            ("carol@y.com", RecipientKind::To),
            ("dave@z.com", RecipientKind::Cc),
            ("eve@z.com", RecipientKind::Bcc),
        ]
    );
    assert_eq!(model.recipients[0].display_name, "Bob");
}

// ─── Nameless attachments ───────────────────────────────────────────

#[test]
fn test_nameless_attachments() {
    let model = convert_eml_to_model(fixture("nameless.eml")).unwrap();
    let names: Vec<&str> = model
        .attachments
        .iter()
        .map(|a| a.filename.as_str())
        .collect();
    assert_eq!(names, vec!["Nameless", "report.pdf", "Nameless1"]);
    assert_eq!(model.attachments[0].content, vec![0, 1, 2]);
}

#[test]
fn test_inline_without_cid_is_not_inline() {
    let model = convert_eml_to_model(fixture("nameless.eml")).unwrap();
    let last = model.attachments.last().unwrap();
    assert!(!last.is_inline);
    assert!(last.content_id.is_none());
    assert_eq!(model.inline_attachments().count(), 0);
}

// ─── Nested message ─────────────────────────────────────────────────

#[test]
fn test_nested_message() {
    let model = convert_eml_to_model(fixture("nested.eml")).unwrap();
    assert_eq!(model.attachments.len(), 1);
    let nested = &model.attachments[0];
    assert_eq!(nested.filename, "Receipt.eml");
    let text = String::from_utf8_lossy(&nested.content);
    assert!(text.contains("Subject: Receipt"));
    assert!(text.contains("Total: 10 EUR"));
}

// ─── Inline text fragment merged into body ──────────────────────────

#[test]
fn test_inline_text_fragment_merged() {
    let model = convert_eml_to_model(fixture("inline_text.eml")).unwrap();
    assert!(model.attachments.is_empty());
    assert!(model.body.plain.starts_with("Main body"));
    assert!(model.body.plain.contains("\nFooter line one"));
    assert!(model.body.html.contains("Footer line one<br>Footer line two"));
}

#[test]
fn test_resent_sender_and_unknown_importance() {
    let model = convert_eml_to_model(fixture("inline_text.eml")).unwrap();
    assert_eq!(model.sender.address, "alice@x.com");
    assert_eq!(model.representing.address, "assistant@x.com");
    assert_eq!(model.representing.display_name, "Assistant");
    assert_eq!(model.importance, Importance::Normal);
}

// ─── Delivery-status report ─────────────────────────────────────────

#[test]
fn test_delivery_status_report() {
    let model = convert_eml_to_model(fixture("delivery_report.eml")).unwrap();
    assert_eq!(model.attachments.len(), 1);
    let report = &model.attachments[0];
    assert_eq!(report.filename, "details.txt");
    assert!(String::from_utf8_lossy(&report.content).contains("Status: 5.1.1"));
}

// ─── Read receipt ───────────────────────────────────────────────────

#[test]
fn test_disposition_notification_extracted() {
    let model = convert_eml_to_model(fixture("mdn.eml")).unwrap();
    assert!(model.body.plain.starts_with("Your message was displayed."));
    assert!(!model.body.plain.contains("Reporting-UA"));
    assert!(!model.body.html.contains("Reporting-UA"));

    assert_eq!(model.attachments.len(), 1);
    let receipt = &model.attachments[0];
    assert_eq!(receipt.filename, "Nameless");
    assert!(!receipt.is_inline);
    assert!(String::from_utf8_lossy(&receipt.content).contains("Disposition: manual-action"));
}

// ─── Errors ─────────────────────────────────────────────────────────

#[test]
fn test_missing_sender() {
    let err = convert_eml_to_model(fixture("no_from.eml")).unwrap_err();
    assert!(matches!(err, ConvertError::MissingSender));
}

#[test]
fn test_recipient_without_address() {
    let err = convert_eml_to_model(fixture("bad_recipient.eml")).unwrap_err();
    assert!(matches!(err, ConvertError::MalformedSource(_)));
}

#[test]
fn test_missing_input() {
    let err = convert_eml_to_model(fixture("does_not_exist.eml")).unwrap_err();
    assert!(matches!(err, ConvertError::FileNotFound(_)));
}

#[test]
fn test_reverse_direction_creates_nothing() {
    let temp = assert_fs::TempDir::new().unwrap();
    let out = temp.child("back.eml");
    let err = convert_msg_to_eml(fixture("simple.eml"), out.path()).unwrap_err();
    assert!(matches!(err, ConvertError::UnsupportedDirection));
    out.assert(predicate::path::missing());
}

// ─── Container persistence ──────────────────────────────────────────

#[test]
fn test_convert_to_container_and_read_back() {
    let temp = assert_fs::TempDir::new().unwrap();
    let out = temp.child("nameless.msgm");

    let model = convert_eml_to_msg(fixture("nameless.eml"), out.path(), &MsgmWriter::default())
        .unwrap();
    out.assert(predicate::path::is_file());

    let stored = read_container(out.path()).unwrap();
    assert_eq!(stored.subject, model.subject);
    assert_eq!(stored.attachments.len(), 3);
    assert_eq!(stored.attachments[1].filename, "report.pdf");
    assert_eq!(
        stored.attachments[1].size,
        stored.attachments[1].content.len() as i64
    );
}

#[test]
fn test_existing_output_not_overwritten() {
    let temp = assert_fs::TempDir::new().unwrap();
    let out = temp.child("simple.msgm");
    out.write_str("keep me").unwrap();

    let err = convert_eml_to_msg(fixture("simple.eml"), out.path(), &MsgmWriter::new(false))
        .unwrap_err();
    match err {
        ConvertError::Io { source, .. } => {
            assert_eq!(source.kind(), std::io::ErrorKind::AlreadyExists)
        }
        other => panic!("unexpected error: {other}"),
    }
    out.assert("keep me");

    convert_eml_to_msg(fixture("simple.eml"), out.path(), &MsgmWriter::new(true)).unwrap();
    assert!(read_container(out.path()).is_ok());
}
