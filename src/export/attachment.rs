//! Write extracted attachments to disk.

use std::path::{Path, PathBuf};

use crate::error::{ConvertError, Result};
use crate::model::attachment::AttachmentRecord;
use crate::model::mail::MessageModel;

/// Write one attachment into `output_dir` under its assigned filename.
///
/// Returns the path of the created file.
pub fn export_attachment(attachment: &AttachmentRecord, output_dir: &Path) -> Result<PathBuf> {
    let path = unique_path(&output_dir.join(&attachment.filename));
    std::fs::write(&path, &attachment.content).map_err(|e| ConvertError::io(&path, e))?;
    Ok(path)
}

/// Write every attachment of a converted message.
pub fn export_all_attachments(model: &MessageModel, output_dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir).map_err(|e| ConvertError::io(output_dir, e))?;

    let mut paths = Vec::with_capacity(model.attachments.len());
    for att in &model.attachments {
        let path = export_attachment(att, output_dir)?;
        tracing::debug!(path = %path.display(), bytes = att.len(), "Wrote attachment");
        paths.push(path);
    }
    Ok(paths)
}

/// If `path` already exists, append a counter to make it unique.
///
/// Attachment names are not unique within a message, so two `report.pdf`
/// parts land as `report.pdf` and `report_1.pdf`.
fn unique_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }

    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("file");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let parent = path.parent().unwrap_or(Path::new("."));

    for i in 1..1000 {
        let candidate = if ext.is_empty() {
            parent.join(format!("{stem}_{i}"))
        } else {
            parent.join(format!("{stem}_{i}.{ext}"))
        };
        if !candidate.exists() {
            return candidate;
        }
    }

    // Fallback, very unlikely
    parent.join(format!("{stem}_dup.{ext}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_names_do_not_overwrite() {
        let tmp = tempfile::tempdir().unwrap();
        let a = AttachmentRecord::new(b"one".to_vec(), "report.pdf".into(), None, false);
        let b = AttachmentRecord::new(b"two".to_vec(), "report.pdf".into(), None, false);

        let pa = export_attachment(&a, tmp.path()).unwrap();
        let pb = export_attachment(&b, tmp.path()).unwrap();

        assert_eq!(pa.file_name().unwrap(), "report.pdf");
        assert_eq!(pb.file_name().unwrap(), "report_1.pdf");
        assert_eq!(std::fs::read(pb).unwrap(), b"two");
    }

    #[test]
    fn test_unique_path_without_extension() {
        let tmp = tempfile::tempdir().unwrap();
        let p = tmp.path().join("Nameless");
        std::fs::write(&p, b"x").unwrap();
        assert_eq!(unique_path(&p), tmp.path().join("Nameless_1"));
    }
}
