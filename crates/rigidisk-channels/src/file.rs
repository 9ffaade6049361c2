//! File-backed block channel
//!
//! The reference channel implementation: a flat dump file (or a raw device
//! node exposed as one) addressed by seeking to `index * 512` before every
//! read or write. No buffering or caching sits between the caller and the
//! medium.

use std::fs::OpenOptions;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use rigidisk_core::{Block, BlockChannel, Error, Result, BLOCK_SIZE};

/// Access mode requested when opening a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelMode {
    /// Reads only; writes are rejected
    ReadOnly,
    /// Reads and writes
    ReadWrite,
}

/// A block channel over a flat file.
///
/// Opening validates the target up front: it must exist, be a regular file,
/// and be accessible for the requested mode. Discovery never starts against
/// a channel that failed to open.
pub struct FileChannel {
    file: std::fs::File,
    blocks: u64,
    mode: ChannelMode,
}

impl FileChannel {
    /// Open a file-backed channel
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the dump file or device node
    /// * `mode` - Read-only or read-write access
    ///
    /// # Errors
    ///
    /// Returns a descriptive error if the target is missing, is not a
    /// regular file, or cannot be opened for the requested mode.
    pub fn open(path: &Path, mode: ChannelMode) -> Result<Self> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            Error::channel_open(format!("cannot stat [{}]: {}", path.display(), e))
        })?;

        if !metadata.is_file() {
            return Err(Error::not_regular_file(path.display().to_string()));
        }

        let file = OpenOptions::new()
            .read(true)
            .write(mode == ChannelMode::ReadWrite)
            .open(path)
            .map_err(|e| {
                let verb = match mode {
                    ChannelMode::ReadOnly => "readonly",
                    ChannelMode::ReadWrite => "readwrite",
                };
                Error::channel_open(format!(
                    "unable to open [{}] {}: {}",
                    path.display(),
                    verb,
                    e
                ))
            })?;

        let blocks = metadata.len() / BLOCK_SIZE as u64;
        tracing::debug!(path = %path.display(), blocks, ?mode, "opened file channel");

        Ok(Self { file, blocks, mode })
    }

    /// Access mode the channel was opened with
    pub fn mode(&self) -> ChannelMode {
        self.mode
    }

    fn check_range(&self, index: u64) -> Result<()> {
        if index >= self.blocks {
            return Err(Error::OutOfRange {
                index,
                blocks: self.blocks,
            });
        }
        Ok(())
    }
}

impl BlockChannel for FileChannel {
    fn identify(&self) -> &str {
        "File-backed channel"
    }

    fn block_count(&self) -> u64 {
        self.blocks
    }

    fn read_block(&mut self, index: u64, buf: &mut Block) -> Result<()> {
        self.check_range(index)?;
        self.file
            .seek(SeekFrom::Start(index * BLOCK_SIZE as u64))?;
        self.file.read_exact(buf)?;
        Ok(())
    }

    fn write_block(&mut self, index: u64, block: &Block) -> Result<()> {
        if self.mode == ChannelMode::ReadOnly {
            return Err(Error::read_only("channel was opened readonly"));
        }
        self.check_range(index)?;
        self.file
            .seek(SeekFrom::Start(index * BLOCK_SIZE as u64))?;
        self.file.write_all(block)?;
        Ok(())
    }
}
