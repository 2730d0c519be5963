//! Loader for individual `.eml` files (RFC 5322 messages without MBOX framing).

use std::path::Path;

use tracing::debug;

use crate::error::{ConvertError, Result};
use crate::model::source::SourceMessage;
use crate::parser::mime;

/// Read and load a single `.eml` file.
pub fn load_eml(path: impl AsRef<Path>) -> Result<SourceMessage> {
    let path = path.as_ref();
    let data = read_eml(path)?;
    debug!(path = %path.display(), bytes = data.len(), "Loaded EML file");
    mime::load_source(&data)
}

/// Read the raw bytes of an `.eml` file, distinguishing a missing file.
pub fn read_eml(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConvertError::FileNotFound(path.to_path_buf())
        } else {
            ConvertError::io(path, e)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file() {
        let err = load_eml("/definitely/not/here.eml").unwrap_err();
        assert!(matches!(err, ConvertError::FileNotFound(_)));
    }

    #[test]
    fn test_load_from_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("m.eml");
        std::fs::write(&path, "From: a@b.com\nSubject: Disk\n\nBody\n").unwrap();
        let src = load_eml(&path).unwrap();
        assert_eq!(src.subject.as_deref(), Some("Disk"));
    }
}
