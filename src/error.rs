//! Error types for agent-mailbox

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Lock timeout: {0}")]
    LockTimeout(String),

    #[error("Document parse error: {0}")]
    Parse(String),

    #[error("Document write error: {0}")]
    Write(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
