//! Memory-mapped block channel
//!
//! A read-only conformer over a mapped regular file. Useful when the same
//! image is scanned repeatedly; block reads become plain memory copies.

use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

use rigidisk_core::{Block, BlockChannel, Error, Result, BLOCK_SIZE};

/// A read-only block channel backed by a memory-mapped file.
///
/// # Safety
///
/// Uses `unsafe` for the mapping itself. The target is validated to be a
/// regular file first, and the mapping is private and read-only. The file
/// must not be truncated while the channel is alive (caller responsibility).
pub struct MmapChannel {
    mmap: Mmap,
    blocks: u64,
}

impl MmapChannel {
    /// Open a file and map it read-only
    ///
    /// # Errors
    ///
    /// Returns a descriptive error if the target is missing, is not a
    /// regular file, or cannot be mapped.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            Error::channel_open(format!("cannot open [{}]: {}", path.display(), e))
        })?;
        let metadata = file.metadata()?;

        if !metadata.is_file() {
            return Err(Error::not_regular_file(path.display().to_string()));
        }

        // SAFETY: the target is a regular file and the descriptor is valid
        // (File::open succeeded). The mapping is read-only and private.
        let mmap = unsafe { Mmap::map(&file)? };

        let blocks = metadata.len() / BLOCK_SIZE as u64;
        tracing::debug!(path = %path.display(), blocks, "opened mmap channel");

        Ok(Self { mmap, blocks })
    }
}

impl BlockChannel for MmapChannel {
    fn identify(&self) -> &str {
        "Memory-mapped channel"
    }

    fn block_count(&self) -> u64 {
        self.blocks
    }

    fn read_block(&mut self, index: u64, buf: &mut Block) -> Result<()> {
        if index >= self.blocks {
            return Err(Error::OutOfRange {
                index,
                blocks: self.blocks,
            });
        }
        let start = index as usize * BLOCK_SIZE;
        buf.copy_from_slice(&self.mmap[start..start + BLOCK_SIZE]);
        Ok(())
    }

    fn write_block(&mut self, _index: u64, _block: &Block) -> Result<()> {
        Err(Error::read_only("memory-mapped channels are read-only"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::{tempdir, NamedTempFile};

    fn patterned_image(blocks: usize) -> NamedTempFile {
        let mut tmpfile = NamedTempFile::new().unwrap();
        for i in 0..blocks {
            tmpfile.write_all(&[i as u8; BLOCK_SIZE]).unwrap();
        }
        tmpfile.flush().unwrap();
        tmpfile
    }

    #[test]
    fn test_mmap_read_block() {
        let img = patterned_image(3);
        let mut channel = MmapChannel::open(img.path()).unwrap();

        assert_eq!(channel.block_count(), 3);

        let mut block = [0u8; BLOCK_SIZE];
        channel.read_block(1, &mut block).unwrap();
        assert!(block.iter().all(|&b| b == 1));
    }

    #[test]
    fn test_mmap_out_of_range() {
        let img = patterned_image(3);
        let mut channel = MmapChannel::open(img.path()).unwrap();

        let mut block = [0u8; BLOCK_SIZE];
        assert!(matches!(
            channel.read_block(3, &mut block),
            Err(Error::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_mmap_write_rejected() {
        let img = patterned_image(3);
        let mut channel = MmapChannel::open(img.path()).unwrap();

        let block = [0u8; BLOCK_SIZE];
        assert!(matches!(
            channel.write_block(0, &block),
            Err(Error::ReadOnly(_))
        ));
    }

    #[test]
    fn test_mmap_directory_rejected() {
        let dir = tempdir().unwrap();
        let result = MmapChannel::open(dir.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_mmap_matches_file_channel() {
        use crate::file::{ChannelMode, FileChannel};

        let img = patterned_image(8);
        let mut mapped = MmapChannel::open(img.path()).unwrap();
        let mut seeked = FileChannel::open(img.path(), ChannelMode::ReadOnly).unwrap();

        let mut a = [0u8; BLOCK_SIZE];
        let mut b = [0u8; BLOCK_SIZE];
        for index in 0..8 {
            mapped.read_block(index, &mut a).unwrap();
            seeked.read_block(index, &mut b).unwrap();
            assert_eq!(a, b);
        }
    }
}
