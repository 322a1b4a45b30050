//! # Table Errors
//!
//! The dinner itself has no recoverable failure modes: forks and the host are
//! synchronization primitives, and deadlock or starvation are liveness
//! properties checked by tests. What remains is infrastructure: a rejected
//! configuration, a closed semaphore, a failed write to stdout, or a
//! philosopher task that panicked.

use thiserror::Error;

/// Errors that can occur while seating or running the table.
#[derive(Debug, Error)]
pub enum TableError {
    /// The configuration cannot describe a valid table.
    #[error("Invalid table configuration: {0}")]
    InvalidConfig(String),

    /// A fork or the host was closed while a philosopher waited on it.
    #[error("Synchronization primitive closed")]
    Closed,

    /// Writing an eating line failed.
    #[error("Journal write failed: {0}")]
    Io(#[from] std::io::Error),

    /// A philosopher task panicked or was aborted.
    #[error("Philosopher task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, TableError>;
