//! Atomic document persistence
//!
//! Serializes the document to YAML and replaces the target file in
//! one rename. The temp file is created in the document's own
//! directory so the rename never crosses a filesystem boundary; a
//! concurrent reader sees either the complete old document or the
//! complete new one, never a partial write.

use crate::document::MailboxDocument;
use crate::error::{Error, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Serialize `document` and atomically replace the file at `path`.
///
/// # Errors
///
/// Returns [`Error::Write`] if serialization, the temp write, or the
/// final rename fails. The temp artifact is cleaned up on every
/// failure path and the original document is left untouched.
pub fn persist(path: &Path, document: &MailboxDocument) -> Result<()> {
    let yaml = serde_yaml::to_string(document)
        .map_err(|e| Error::Write(format!("Cannot serialize document: {e}")))?;

    let dir = path.parent().ok_or_else(|| {
        Error::Write(format!("Document path {} has no parent", path.display()))
    })?;

    let mut tmp = NamedTempFile::new_in(dir)
        .map_err(|e| Error::Write(format!("Cannot create temp file in {}: {e}", dir.display())))?;

    tmp.write_all(yaml.as_bytes())
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| Error::Write(format!("Cannot write temp document: {e}")))?;

    tmp.persist(path)
        .map_err(|e| Error::Write(format!("Cannot replace {}: {e}", path.display())))?;

    debug!(
        "Persisted {} ({} messages)",
        path.display(),
        document.len()
    );
    Ok(())
}
