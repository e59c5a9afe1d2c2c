//! Durable per-recipient mailbox library
//!
//! A file-backed message mailbox for asynchronous signaling between
//! independent actors (agents, workers). Each recipient identity owns
//! one YAML document; appends from any number of processes are
//! serialized by a per-mailbox exclusive lock and made visible via
//! atomic replace, so concurrent observers never see a torn document.
//!
//! The write path is [`Mailbox::append_message`]: validate, acquire
//! the lock (with bounded retry), load-or-create the document, append
//! and evict, then atomically persist.

mod config;
mod document;
mod error;
mod lock;
mod mailbox;
mod message;
mod store;
mod writer;

pub use config::{MailboxConfig, RetryPolicy};
pub use document::{MailboxDocument, READ_KEEP, RETENTION_CAP};
pub use error::{Error, Result};
pub use lock::MailboxLock;
pub use mailbox::Mailbox;
pub use message::{DEFAULT_FROM, DEFAULT_KIND, Message};
