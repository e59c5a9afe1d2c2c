//! Timed exclusive mailbox lock
//!
//! Advisory lock on the mailbox's sibling `.lock` marker, giving each
//! writer exclusive use of the whole read-modify-write cycle. The
//! marker's content is irrelevant and the file is never deleted; only
//! the advisory lock on it matters, so lock state is meaningful even
//! while the document itself is being replaced.

use crate::error::{Error, Result};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::debug;

/// Delay between lock polls while waiting for the holder.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// An acquired exclusive lock on one mailbox.
///
/// Released on drop, so the lock is given up on every exit path of
/// the critical section, normal completion and errors alike.
#[derive(Debug)]
pub struct MailboxLock {
    file: File,
    path: PathBuf,
}

impl MailboxLock {
    /// Block until the lock is acquired or `timeout` elapses.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockTimeout`] when another process still
    /// holds the lock at the deadline; acquiring has no side effects
    /// in that case. IO failures opening the marker surface as
    /// [`Error::Io`].
    pub fn acquire(path: &Path, timeout: Duration) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;

        let start = Instant::now();
        loop {
            if file.try_lock_exclusive().is_ok() {
                debug!("Acquired lock on {}", path.display());
                return Ok(Self {
                    file,
                    path: path.to_path_buf(),
                });
            }

            if start.elapsed() >= timeout {
                return Err(Error::LockTimeout(format!(
                    "Could not acquire {} within {:.1}s",
                    path.display(),
                    timeout.as_secs_f64()
                )));
            }

            std::thread::sleep(POLL_INTERVAL.min(timeout));
        }
    }
}

impl Drop for MailboxLock {
    fn drop(&mut self) {
        // The marker file stays behind; only the advisory lock is
        // released.
        let _ = FileExt::unlock(&self.file);
        debug!("Released lock on {}", self.path.display());
    }
}
