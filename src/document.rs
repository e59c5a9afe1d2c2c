//! Mailbox document and retention policy
//!
//! The document is the full persisted state for one recipient: an
//! ordered log of messages, bounded by the retention policy applied
//! after every append.

use crate::message::Message;
use serde::{Deserialize, Serialize};

/// Retention threshold: eviction runs only once the log grows past
/// this many messages.
pub const RETENTION_CAP: usize = 50;

/// How many of the newest read messages survive an eviction.
pub const READ_KEEP: usize = 30;

/// The persisted message log for one recipient identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailboxDocument {
    pub messages: Vec<Message>,
}

impl MailboxDocument {
    /// An empty document, as materialized for a first-touch mailbox.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Append a message and enforce retention.
    ///
    /// The message id must already be assigned; this method never
    /// mutates existing entries, so a `read` flag set by an external
    /// reader survives the rewrite.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
        self.apply_retention();
    }

    /// Evict the oldest read messages once the log exceeds
    /// [`RETENTION_CAP`].
    ///
    /// Unread messages are never discarded, which means a mailbox
    /// whose unread backlog alone exceeds the cap legitimately stays
    /// above it. Relative order within each partition is preserved:
    /// the surviving set is all unread messages followed by the
    /// newest [`READ_KEEP`] read ones.
    pub fn apply_retention(&mut self) {
        if self.messages.len() <= RETENTION_CAP {
            return;
        }

        let (unread, read): (Vec<Message>, Vec<Message>) =
            self.messages.drain(..).partition(|m| !m.read);

        let keep_from = read.len().saturating_sub(READ_KEEP);
        self.messages = unread;
        self.messages.extend(read.into_iter().skip(keep_from));
    }

    /// Number of messages currently retained.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
