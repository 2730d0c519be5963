//! Container persistence: the [`ContainerWriter`] seam and the `.msgm` writer.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::container::format::{ContainerHeader, EXTENSION, HEADER_SIZE, MAGIC, VERSION};
use crate::error::{ConvertError, Result};
use crate::model::mail::MessageModel;

/// Persists an assembled [`MessageModel`] in some on-disk container format.
///
/// The model is format-agnostic; implementations own the layout.
pub trait ContainerWriter {
    fn save(&self, model: &MessageModel, path: &Path) -> Result<()>;
}

/// Writes the `.msgm` container described in [`crate::container::format`].
#[derive(Debug, Clone, Default)]
pub struct MsgmWriter {
    /// Replace an existing file at the destination.
    pub overwrite: bool,
}

impl MsgmWriter {
    pub fn new(overwrite: bool) -> Self {
        Self { overwrite }
    }
}

impl ContainerWriter for MsgmWriter {
    fn save(&self, model: &MessageModel, path: &Path) -> Result<()> {
        let bytes = encode(model)?;
        let mut file = open_output(path, self.overwrite)?;
        file.write_all(&bytes).map_err(|e| ConvertError::io(path, e))?;
        file.flush().map_err(|e| ConvertError::io(path, e))?;
        info!(path = %path.display(), bytes = bytes.len(), "Container written");
        Ok(())
    }
}

/// Encode a model into container bytes (header + payload).
///
/// Attachment sizes are recorded as their byte length in the stored copy.
pub fn encode(model: &MessageModel) -> Result<Vec<u8>> {
    let mut stored = model.clone();
    for att in &mut stored.attachments {
        att.size = att.content.len() as i64;
    }

    let payload = bincode::serialize(&stored)?;

    let header = ContainerHeader {
        magic: *MAGIC,
        version: VERSION,
        flags: 0,
        recipient_count: count(stored.recipients.len())?,
        attachment_count: count(stored.attachments.len())?,
        payload_len: payload.len() as u64,
        sha256_payload: sha256(&payload),
    };
    let header_bytes = bincode::serialize(&header)?;

    // Pad header to HEADER_SIZE
    let mut out = vec![0u8; HEADER_SIZE];
    let copy_len = header_bytes.len().min(HEADER_SIZE);
    out[..copy_len].copy_from_slice(&header_bytes[..copy_len]);
    out.extend_from_slice(&payload);

    debug!(
        payload = payload.len(),
        attachments = header.attachment_count,
        "Encoded container"
    );
    Ok(out)
}

/// SHA-256 of a byte slice.
pub(crate) fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

fn count(n: usize) -> Result<u32> {
    u32::try_from(n).map_err(|_| ConvertError::Container(format!("too many entries: {n}")))
}

/// Open the destination, refusing to clobber an existing file unless asked to.
fn open_output(path: &Path, overwrite: bool) -> Result<File> {
    let result = if overwrite {
        File::create(path)
    } else {
        OpenOptions::new().write(true).create_new(true).open(path)
    };
    result.map_err(|e| ConvertError::io(path, e))
}

/// Default output path for an input file: same directory (or `output_dir`),
/// same stem, container extension.
///
/// Example: `/mail/invoice.eml` → `/mail/invoice.msgm`
pub fn output_path_for(input: &Path, output_dir: Option<&Path>, extension: &str) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let ext = if extension.is_empty() {
        EXTENSION
    } else {
        extension.trim_start_matches('.')
    };
    let name = format!("{stem}.{ext}");
    match output_dir {
        Some(dir) => dir.join(name),
        None => input.with_file_name(name),
    }
}
