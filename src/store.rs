//! On-disk document layout and loading
//!
//! Each recipient identity maps to one YAML document under the
//! configured root, with a sibling lock marker:
//!
//! ```text
//! <root>/<identity>.yaml        the mailbox document
//! <root>/<identity>.yaml.lock   mutual-exclusion token (never deleted)
//! ```

use crate::document::MailboxDocument;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Path of the mailbox document for an identity.
#[must_use]
pub fn document_path(root: &Path, mailbox_id: &str) -> PathBuf {
    root.join(format!("{mailbox_id}.yaml"))
}

/// Path of the lock marker tied 1:1 to the document.
///
/// The lock binds to this side file, not to the document itself, so
/// lock state stays independent of document state (the document is
/// replaced wholesale on every write).
#[must_use]
pub fn lock_path(root: &Path, mailbox_id: &str) -> PathBuf {
    root.join(format!("{mailbox_id}.yaml.lock"))
}

/// Load the current document, treating absence as an empty mailbox.
///
/// First-touch initialization happens here rather than at some
/// earlier existence check, and callers hold the mailbox lock while
/// loading, so two first-time senders cannot race each other.
///
/// # Errors
///
/// Returns [`Error::Parse`] if a document exists but is not valid
/// YAML for a message log; no repair is attempted.
pub fn load(path: &Path) -> Result<MailboxDocument> {
    if !path.exists() {
        debug!("No document at {}, starting empty", path.display());
        return Ok(MailboxDocument::empty());
    }

    let raw = fs::read_to_string(path)
        .map_err(|e| Error::Parse(format!("Cannot read {}: {e}", path.display())))?;

    serde_yaml::from_str(&raw)
        .map_err(|e| Error::Parse(format!("Cannot parse {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Message;

    #[test]
    fn paths_are_siblings() {
        let root = Path::new("/var/mail");
        assert_eq!(
            document_path(root, "worker-1"),
            PathBuf::from("/var/mail/worker-1.yaml")
        );
        assert_eq!(
            lock_path(root, "worker-1"),
            PathBuf::from("/var/mail/worker-1.yaml.lock")
        );
    }

    #[test]
    fn load_missing_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let doc = load(&document_path(dir.path(), "nobody")).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = document_path(dir.path(), "worker-1");

        let mut doc = MailboxDocument::empty();
        doc.messages.push(Message::new("ping"));
        fs::write(&path, serde_yaml::to_string(&doc).unwrap()).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded, doc);
    }

    #[test]
    fn load_garbage_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = document_path(dir.path(), "worker-1");
        fs::write(&path, "messages: [unterminated").unwrap();

        match load(&path) {
            Err(Error::Parse(_)) => {}
            other => panic!("expected Parse error, got {other:?}"),
        }
    }
}
