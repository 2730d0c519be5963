//! Reading `.msgm` containers back into a [`MessageModel`].

use std::path::Path;

use tracing::debug;

use crate::container::format::{ContainerHeader, HEADER_SIZE};
use crate::container::writer::sha256;
use crate::error::{ConvertError, Result};
use crate::model::mail::MessageModel;

/// Read and validate a container file.
pub fn read_container(path: &Path) -> Result<MessageModel> {
    let data = std::fs::read(path).map_err(|e| ConvertError::io(path, e))?;
    debug!(path = %path.display(), bytes = data.len(), "Reading container");
    decode(&data)
}

/// Decode container bytes, checking header, checksum and counts.
pub fn decode(data: &[u8]) -> Result<MessageModel> {
    if data.len() < HEADER_SIZE {
        return Err(ConvertError::Container("file too small".into()));
    }

    let header: ContainerHeader = bincode::deserialize(&data[..HEADER_SIZE])
        .map_err(|e| ConvertError::Container(format!("header deserialization failed: {e}")))?;
    header.validate().map_err(ConvertError::Container)?;

    let payload = &data[HEADER_SIZE..];
    if payload.len() as u64 != header.payload_len {
        return Err(ConvertError::Container(format!(
            "payload length mismatch: header says {}, found {}",
            header.payload_len,
            payload.len()
        )));
    }
    if sha256(payload) != header.sha256_payload {
        return Err(ConvertError::Container("payload checksum mismatch".into()));
    }

    let model: MessageModel = bincode::deserialize(payload)
        .map_err(|e| ConvertError::Container(format!("payload deserialization failed: {e}")))?;

    if model.recipients.len() as u64 != u64::from(header.recipient_count)
        || model.attachments.len() as u64 != u64::from(header.attachment_count)
    {
        return Err(ConvertError::Container("entry count mismatch".into()));
    }

    Ok(model)
}
