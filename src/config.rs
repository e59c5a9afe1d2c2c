//! Mailbox root and retry configuration

use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Bounded retry policy wrapped around the locked critical section.
///
/// The retry loop is deliberately decoupled from the locking code so
/// tests can shrink the timeouts to milliseconds.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum lock-acquisition attempts before giving up.
    pub max_attempts: u32,
    /// Lock-acquisition timeout for a single attempt.
    pub lock_timeout: Duration,
    /// Fixed sleep between failed attempts.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            lock_timeout: Duration::from_secs(5),
            backoff: Duration::from_secs(1),
        }
    }
}

/// Mailbox storage configuration
#[derive(Debug, Clone)]
pub struct MailboxConfig {
    /// Directory holding one YAML document (and lock marker) per
    /// recipient identity.
    pub root: PathBuf,
    pub retry: RetryPolicy,
}

impl MailboxConfig {
    /// Configuration rooted at the given directory with default retries.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            retry: RetryPolicy::default(),
        }
    }

    /// Load mailbox configuration from environment variables
    ///
    /// Reads from `.env` file if present. All variables are optional
    /// (with defaults):
    /// - `MAILBOX_ROOT` (default: `./mailboxes`)
    /// - `MAILBOX_RETRY_ATTEMPTS` (default: `3`)
    /// - `MAILBOX_LOCK_TIMEOUT_SECS` (default: `5`)
    /// - `MAILBOX_RETRY_BACKOFF_SECS` (default: `1`)
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let root = env::var("MAILBOX_ROOT").unwrap_or_else(|_| "./mailboxes".to_string());

        Ok(Self {
            root: PathBuf::from(root),
            retry: RetryPolicy {
                max_attempts: parse_env("MAILBOX_RETRY_ATTEMPTS", 3)?,
                lock_timeout: Duration::from_secs(parse_env("MAILBOX_LOCK_TIMEOUT_SECS", 5)?),
                backoff: Duration::from_secs(parse_env("MAILBOX_RETRY_BACKOFF_SECS", 1)?),
            },
        })
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Validation(format!("Invalid {name}: {e}"))),
        Err(_) => Ok(default),
    }
}
