//! Mailbox append coordinator
//!
//! Owns the end-to-end contract seen by callers: validate, then run
//! the locked read-modify-append-write cycle under a bounded retry
//! policy. Lock contention is the only condition that is retried;
//! parse and write failures inside a successfully locked attempt
//! surface immediately.

use crate::config::MailboxConfig;
use crate::document::MailboxDocument;
use crate::error::{Error, Result};
use crate::lock::MailboxLock;
use crate::message::Message;
use crate::{store, writer};
use tracing::{info, warn};

/// Append-side handle over a directory of per-recipient mailboxes.
pub struct Mailbox {
    config: MailboxConfig,
}

impl Mailbox {
    #[must_use]
    pub const fn new(config: MailboxConfig) -> Self {
        Self { config }
    }

    /// Build a message from `content` and deliver it to `target`.
    ///
    /// Returns the appended message (with its assigned id and
    /// timestamp) so callers can print a receipt.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails, the lock cannot be
    /// acquired within the full retry budget, or the document cannot
    /// be read back or rewritten.
    pub fn append_message(&self, target: &str, content: &str) -> Result<Message> {
        let message = Message::new(content);
        self.deliver(target, message.clone())?;
        Ok(message)
    }

    /// Deliver an already-constructed message to `target`'s mailbox.
    ///
    /// The message id must be assigned up front (see [`Message::new`]);
    /// it is generated outside the lock, so the whole retry loop can
    /// re-run without minting duplicates.
    ///
    /// # Errors
    ///
    /// Same contract as [`Mailbox::append_message`].
    pub fn deliver(&self, target: &str, message: Message) -> Result<()> {
        validate_identity(target)?;
        if message.content.trim().is_empty() {
            return Err(Error::Validation("Message content is empty".into()));
        }

        let retry = &self.config.retry;
        let lock_path = store::lock_path(&self.config.root, target);

        for attempt in 1..=retry.max_attempts {
            match MailboxLock::acquire(&lock_path, retry.lock_timeout) {
                Ok(lock) => {
                    let result = self.append_locked(target, &message);
                    drop(lock);
                    result?;
                    info!("Delivered message {} to {}", message.id, target);
                    return Ok(());
                }
                Err(Error::LockTimeout(reason)) => {
                    warn!(
                        "Attempt {attempt}/{} failed for {target}: {reason}",
                        retry.max_attempts
                    );
                    if attempt == retry.max_attempts {
                        return Err(Error::LockTimeout(format!(
                            "Gave up on {target} after {} attempts",
                            retry.max_attempts
                        )));
                    }
                    std::thread::sleep(retry.backoff);
                }
                Err(other) => return Err(other),
            }
        }

        // Only reachable with a zero-attempt policy; treat it as an
        // exhausted budget rather than panicking.
        Err(Error::LockTimeout(format!(
            "Gave up on {target} after {} attempts",
            retry.max_attempts
        )))
    }

    /// The critical section proper: load, append, evict, persist.
    /// Callers must hold the mailbox lock.
    fn append_locked(&self, target: &str, message: &Message) -> Result<()> {
        let doc_path = store::document_path(&self.config.root, target);

        let mut document = store::load(&doc_path)?;
        document.push(message.clone());
        writer::persist(&doc_path, &document)
    }

    /// Read a mailbox without taking the lock (diagnostics only).
    ///
    /// Safe with respect to atomicity — the atomic replace guarantees
    /// old-or-new, never a partial document — but not ordered against
    /// in-flight writers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] for an unreadable document.
    pub fn peek(&self, target: &str) -> Result<MailboxDocument> {
        validate_identity(target)?;
        store::load(&store::document_path(&self.config.root, target))
    }
}

/// Reject identities that are empty or would not map cleanly onto a
/// file name.
fn validate_identity(target: &str) -> Result<()> {
    if target.is_empty() {
        return Err(Error::Validation("Target identity is empty".into()));
    }
    if !target
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        return Err(Error::Validation(format!(
            "Target identity '{target}' contains characters outside [A-Za-z0-9._-]"
        )));
    }
    Ok(())
}
