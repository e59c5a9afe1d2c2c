//! Mailbox message record
//!
//! One unit of communication with sender, timestamp, type, content,
//! and read state. Messages are created by the append path and never
//! mutated by it afterwards; only an external reader flips `read`.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sender identity used when the caller does not name one.
pub const DEFAULT_FROM: &str = "unknown";

/// Message type used when the caller does not name one.
pub const DEFAULT_KIND: &str = "wake_up";

/// Timestamp layout written into every message (UTC).
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A single mailbox message.
///
/// The `id` is a UUID v4 assigned at construction, before any lock is
/// taken: uniqueness must not depend on the locking discipline, and a
/// coarse timestamp alone would collide under concurrent senders
/// within the same second.
///
/// # Examples
///
/// ```
/// use agent_mailbox::Message;
///
/// let msg = Message::new("build finished").with_from("ci-worker");
/// assert_eq!(msg.from, "ci-worker");
/// assert_eq!(msg.kind, "wake_up");
/// assert!(!msg.read);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    /// Falls back to [`DEFAULT_FROM`] when an external writer omitted it.
    #[serde(default = "default_from")]
    pub from: String,
    pub timestamp: String,
    /// Falls back to [`DEFAULT_KIND`] when an external writer omitted it.
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    pub content: String,
    #[serde(default)]
    pub read: bool,
}

fn default_from() -> String {
    DEFAULT_FROM.to_string()
}

fn default_kind() -> String {
    DEFAULT_KIND.to_string()
}

impl Message {
    /// Create a message with a fresh id, the current UTC timestamp,
    /// and default sender/type.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            from: DEFAULT_FROM.to_string(),
            timestamp: Utc::now().format(TIMESTAMP_FORMAT).to_string(),
            kind: DEFAULT_KIND.to_string(),
            content: content.into(),
            read: false,
        }
    }

    /// Set the sender identity.
    #[must_use]
    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = from.into();
        self
    }

    /// Set the message type tag.
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }
}
