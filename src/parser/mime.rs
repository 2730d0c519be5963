//! MIME loading: turn raw message bytes into a [`SourceMessage`].
//!
//! `mail-parser` does the heavy lifting. This module flattens its part tree
//! into the closed [`PartKind`] set, picks the canonical bodies, and pulls
//! the few header fields `mail-parser` leaves uninterpreted.

use chrono::{DateTime, Utc};
use mail_parser::{Addr, Address, Message, MessageParser, MessagePart, MimeHeaders, PartType};
use tracing::debug;

use crate::error::{ConvertError, Result};
use crate::model::address::EmailAddress;
use crate::model::source::{BodyPart, PartKind, SourceMessage};
use crate::parser::header;

/// Maximum multipart nesting depth (to prevent stack overflow on adversarial input).
const MAX_DEPTH: usize = 32;

/// Parse a complete raw message (headers + body).
///
/// A leading mbox `From ` separator line and a UTF-8 BOM are skipped.
pub fn load_source(raw_message: &[u8]) -> Result<SourceMessage> {
    let message_bytes = skip_from_line(raw_message);

    let msg = MessageParser::default()
        .parse(message_bytes)
        .ok_or_else(|| ConvertError::MalformedSource("not a MIME message".into()))?;

    let raw_headers = header::extract_raw_headers(message_bytes);
    let unfolded = header::unfold_headers(&raw_headers);

    let has_fields = unfolded.iter().any(|(name, _)| header::is_field_name(name));
    if msg.headers().is_empty() || !has_fields {
        return Err(ConvertError::MalformedSource(
            "message has no header fields".into(),
        ));
    }

    let mut parts = Vec::new();
    collect_parts(&msg, 0, 0, &mut parts)?;
    debug!(parts = parts.len(), "Flattened MIME tree");

    Ok(SourceMessage {
        from: mailboxes("From", msg.from())?,
        to: mailboxes("To", msg.to())?,
        cc: mailboxes("Cc", msg.cc())?,
        bcc: mailboxes("Bcc", msg.bcc())?,
        resent_sender: mailboxes("Resent-Sender", msg.resent_sender())?
            .into_iter()
            .next(),
        subject: msg.subject().map(String::from),
        text_body: canonical_body(&msg, &msg.text_body, false),
        html_body: canonical_body(&msg, &msg.html_body, true),
        date: message_date(&msg, &unfolded),
        message_id: msg.message_id().map(String::from),
        priority: header::parse_priority(header::get_header(&unfolded, "priority")),
        importance: header::parse_importance(header::get_header(&unfolded, "importance")),
        raw_headers,
        parts,
    })
}

/// Flatten an address header (groups included) into mailboxes.
///
/// An entry without an address (e.g. a bare display name) is a malformed
/// source, not an empty mailbox.
fn mailboxes(field: &str, address: Option<&Address<'_>>) -> Result<Vec<EmailAddress>> {
    let addrs: Vec<&Addr<'_>> = match address {
        None => return Ok(Vec::new()),
        Some(Address::List(list)) => list.iter().collect(),
        Some(Address::Group(groups)) => groups.iter().flat_map(|g| g.addresses.iter()).collect(),
    };

    addrs
        .into_iter()
        .map(|addr| match addr.address() {
            Some(address) if !address.trim().is_empty() => Ok(EmailAddress::new(
                address.trim(),
                addr.name().unwrap_or_default().trim(),
            )),
            _ => Err(ConvertError::MalformedSource(format!(
                "{field}: '{}' is not a mailbox",
                addr.name().unwrap_or_default()
            ))),
        })
        .collect()
}

/// First body part of the requested flavor.
///
/// `mail-parser` lists HTML parts among the text body (and vice versa) when
/// the alternative is missing; only a genuine part of the flavor counts.
fn canonical_body(msg: &Message<'_>, ids: &[usize], html: bool) -> Option<String> {
    ids.iter()
        .filter_map(|&id| msg.part(id))
        .find_map(|part| match (&part.body, html) {
            (PartType::Text(text), false) | (PartType::Html(text), true) => {
                Some(text.to_string())
            }
            _ => None,
        })
}

/// The `Date:` header in UTC, with a lenient fallback for broken dates.
fn message_date(msg: &Message<'_>, headers: &[(String, String)]) -> Option<DateTime<Utc>> {
    if let Some(dt) = msg
        .date()
        .and_then(|d| DateTime::from_timestamp(d.to_timestamp(), 0))
    {
        return Some(dt);
    }
    header::get_header(headers, "date").and_then(header::parse_date)
}

/// Depth-first walk over multipart containers, in document order.
///
/// Nested messages are listed as leaves; their own parts are not visited.
fn collect_parts(
    msg: &Message<'_>,
    id: usize,
    depth: usize,
    out: &mut Vec<BodyPart>,
) -> Result<()> {
    if depth > MAX_DEPTH {
        return Err(ConvertError::MalformedSource(format!(
            "MIME nesting deeper than {MAX_DEPTH} levels"
        )));
    }

    let part = msg
        .part(id)
        .ok_or_else(|| ConvertError::MalformedSource(format!("missing MIME part #{id}")))?;

    match &part.body {
        PartType::Multipart(children) => {
            for &child in children {
                collect_parts(msg, child, depth + 1, out)?;
            }
        }
        _ => out.push(body_part(part)),
    }
    Ok(())
}

/// Build a [`BodyPart`] from a leaf `mail-parser` part.
fn body_part(part: &MessagePart<'_>) -> BodyPart {
    let (ctype, subtype) = part
        .content_type()
        .map(|ct| {
            (
                ct.ctype().to_ascii_lowercase(),
                ct.subtype().unwrap_or_default().to_ascii_lowercase(),
            )
        })
        .unwrap_or_else(|| ("text".to_string(), "plain".to_string()));

    let kind = match (&part.body, ctype.as_str(), subtype.as_str()) {
        (_, "message", "disposition-notification") => PartKind::DispositionNotification,
        (_, "message", "delivery-status" | "global-delivery-status") => PartKind::DeliveryStatus,
        (PartType::Message(nested), _, _) => PartKind::NestedMessage {
            subject: nested.subject().map(String::from),
        },
        (_, "message", "rfc822" | "global") => PartKind::NestedMessage { subject: None },
        (PartType::Text(text) | PartType::Html(text), _, _) => PartKind::Text {
            text: text.to_string(),
        },
        (_, "text", _) => PartKind::Text {
            text: String::from_utf8_lossy(part.contents()).into_owned(),
        },
        _ => PartKind::Generic,
    };

    let content_type = if subtype.is_empty() {
        ctype
    } else {
        format!("{ctype}/{subtype}")
    };

    BodyPart {
        kind,
        content_type,
        filename: part.attachment_name().map(String::from),
        content_id: part
            .content_id()
            .map(header::strip_angle_brackets)
            .filter(|id| !id.is_empty()),
        disposition: part.content_disposition().map(|d| d.ctype().to_string()),
        payload: part.contents().to_vec(),
    }
}

/// Skip the mbox `From ` separator line (and a UTF-8 BOM) at the start of a message.
fn skip_from_line(data: &[u8]) -> &[u8] {
    let data = data.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(data);

    if data.starts_with(b"From ") {
        if let Some(pos) = data.iter().position(|&b| b == b'\n') {
            return &data[pos + 1..];
        }
    }
    data
}
