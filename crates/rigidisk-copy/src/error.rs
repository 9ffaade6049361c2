//! Error types for bulk copy operations

use thiserror::Error;

/// Result type for copy operations
pub type Result<T> = std::result::Result<T, CopyError>;

/// Errors that can occur while moving blocks between a device and a file
#[derive(Error, Debug)]
pub enum CopyError {
    /// Channel-level failure (out of range, read-only, I/O)
    #[error(transparent)]
    Channel(#[from] rigidisk_core::Error),

    /// File-level I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Source file missing
    #[error("Source not found: {0}")]
    SourceNotFound(String),

    /// Source or destination exists but is not a regular file
    #[error("[{0}] is not a regular file")]
    NotRegularFile(String),

    /// Source exists but could not be opened for reading
    #[error("Can't read from [{path}]: {source}")]
    NotReadable {
        path: String,
        source: std::io::Error,
    },

    /// Destination could not be opened for writing
    #[error("Can't write to [{path}]: {source}")]
    NotWritable {
        path: String,
        source: std::io::Error,
    },

    /// Input size is not addressable in whole blocks
    #[error("Input size {0} is not a multiple of the block size")]
    NotBlockAligned(u64),

    /// Partition import requires the file to match the partition exactly
    #[error("Size mismatch: expected {expected} bytes, got {actual} bytes")]
    SizeMismatch { expected: u64, actual: u64 },
}
