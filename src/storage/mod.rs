//! Storage module
//!
//! The request handler only touches files through the [`Storage`] trait so
//! the upload root can be swapped out (the local filesystem in production).

mod localfs;
mod path;

pub use localfs::LocalFs;
pub use path::{DavPath, PathError};

use async_trait::async_trait;
use hyper::body::Bytes;
use serde::Serialize;
use std::fmt;
use std::io;

/// Kind of a directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

/// One row of a directory listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Size in bytes, 0 for directories
    pub size: u64,
}

/// Storage operation that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateDir,
    Stat,
    Read,
    Write,
    List,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CreateDir => "create directory",
            Self::Stat => "stat",
            Self::Read => "read",
            Self::Write => "write",
            Self::List => "list directory",
        };
        f.write_str(name)
    }
}

/// I/O failure tagged with the operation that produced it
#[derive(Debug, thiserror::Error)]
#[error("{op} failed: {source}")]
pub struct StorageError {
    pub op: Operation,
    #[source]
    pub source: io::Error,
}

impl StorageError {
    pub const fn new(op: Operation, source: io::Error) -> Self {
        Self { op, source }
    }

    /// Transient failures that may succeed if the request is repeated
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.source.kind(),
            io::ErrorKind::Interrupted | io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock
        )
    }
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Capability interface over the upload root
#[async_trait]
pub trait Storage: Send + Sync {
    /// Create the root directory if it is missing
    async fn ensure_root(&self) -> StorageResult<()>;

    /// Kind of the entry at `path`, `None` if it is neither file nor directory
    async fn stat(&self, path: &DavPath) -> StorageResult<Option<EntryKind>>;

    /// Whole file contents
    async fn read(&self, path: &DavPath) -> StorageResult<Bytes>;

    /// Create missing parents and write `data`, replacing any existing file
    async fn write(&self, path: &DavPath, data: Bytes) -> StorageResult<()>;

    /// Immediate children of a directory, sorted by name
    async fn list(&self, path: &DavPath) -> StorageResult<Vec<DirEntry>>;

    /// Human readable location of `path`, used in log lines
    fn describe(&self, path: &DavPath) -> String {
        format!("/{}", path.to_relative().display())
    }
}
