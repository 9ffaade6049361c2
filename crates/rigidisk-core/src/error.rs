//! Rigidisk error types

use thiserror::Error;

/// The main error type for rigidisk operations
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during channel operations
    #[error("Channel I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Channel could not be opened for the requested mode
    #[error("Cannot open channel: {0}")]
    ChannelOpen(String),

    /// Target exists but is not a regular file
    #[error("[{0}] is not a regular file")]
    NotRegularFile(String),

    /// Block index beyond the end of the medium
    #[error("Block {index} out of range: medium has {blocks} blocks")]
    OutOfRange { index: u64, blocks: u64 },

    /// Write attempted through a read-only channel
    #[error("Channel is read-only: {0}")]
    ReadOnly(String),

    /// Partition number outside the discovered volume list
    #[error("Partition number should range between 1 and {count} inclusive, got {requested}")]
    VolumeRange { requested: usize, count: usize },

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),
}

/// Result type alias for rigidisk operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a custom error from a string
    pub fn custom(msg: impl Into<String>) -> Self {
        Error::Custom(msg.into())
    }

    /// Create a channel-open error
    pub fn channel_open(msg: impl Into<String>) -> Self {
        Error::ChannelOpen(msg.into())
    }

    /// Create a not-a-regular-file error
    pub fn not_regular_file(path: impl Into<String>) -> Self {
        Error::NotRegularFile(path.into())
    }

    /// Create a read-only channel error
    pub fn read_only(msg: impl Into<String>) -> Self {
        Error::ReadOnly(msg.into())
    }
}
