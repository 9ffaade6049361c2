//! Sequential block movers between a device and flat files
//!
//! Each mover attempts every I/O operation exactly once; there is no retry.
//! The partition table is consulted only to resolve ranges, never modified.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use rigidisk_core::BLOCK_SIZE;
use rigidisk_rdb::Device;

use crate::error::{CopyError, Result};
use crate::progress::{CopyProgress, ProgressCallback};

/// Export `count` blocks starting at `start` from the device to `dest`.
///
/// Returns the number of blocks written. The destination is created or
/// truncated; if it already exists it must be a regular file.
pub fn export_range(
    device: &mut Device,
    dest: &Path,
    start: u64,
    count: u64,
    progress: Option<ProgressCallback>,
) -> Result<u64> {
    check_destination(dest)?;

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(dest)
        .map_err(|e| CopyError::NotWritable {
            path: dest.display().to_string(),
            source: e,
        })?;
    let mut out = BufWriter::new(file);

    tracing::debug!(start, count, dest = %dest.display(), "exporting block range");

    let mut block = [0u8; BLOCK_SIZE];
    for done in 0..count {
        device.channel_mut().read_block(start + done, &mut block)?;
        out.write_all(&block)?;
        report(&progress, count, done + 1);
    }
    out.flush()?;

    Ok(count)
}

/// Import the whole of `source` into the device starting at block `start`.
///
/// The file size must be a multiple of the block size, and the resulting
/// range must lie within the device. Returns the number of blocks written.
pub fn import_range(
    device: &mut Device,
    source: &Path,
    start: u64,
    progress: Option<ProgressCallback>,
) -> Result<u64> {
    let size = check_source(source)?;
    if size % BLOCK_SIZE as u64 != 0 {
        return Err(CopyError::NotBlockAligned(size));
    }
    let count = size / BLOCK_SIZE as u64;

    let device_blocks = device.block_count();
    if start + count > device_blocks {
        return Err(CopyError::Channel(rigidisk_core::Error::OutOfRange {
            index: start + count - 1,
            blocks: device_blocks,
        }));
    }

    tracing::debug!(start, count, source = %source.display(), "importing block range");

    let mut input = open_source(source)?;
    let mut block = [0u8; BLOCK_SIZE];
    for done in 0..count {
        input.read_exact(&mut block)?;
        device.channel_mut().write_block(start + done, &block)?;
        report(&progress, count, done + 1);
    }

    Ok(count)
}

/// Export one partition, selected by 1-based partition number, to `dest`.
pub fn export_volume(
    device: &mut Device,
    dest: &Path,
    partition: usize,
    progress: Option<ProgressCallback>,
) -> Result<u64> {
    let volume = device.volume_number(partition)?;
    let start = volume.start_block();
    let count = volume.block_count();
    export_range(device, dest, start, count, progress)
}

/// Import `source` into one partition, selected by 1-based partition number.
///
/// The file must be exactly the size of the destination partition.
pub fn import_volume(
    device: &mut Device,
    source: &Path,
    partition: usize,
    progress: Option<ProgressCallback>,
) -> Result<u64> {
    let volume = device.volume_number(partition)?;
    let start = volume.start_block();
    let count = volume.block_count();

    let size = check_source(source)?;
    let expected = count * BLOCK_SIZE as u64;
    if size != expected {
        return Err(CopyError::SizeMismatch {
            expected,
            actual: size,
        });
    }

    tracing::debug!(partition, start, count, "importing partition");

    let mut input = open_source(source)?;
    let mut block = [0u8; BLOCK_SIZE];
    for done in 0..count {
        input.read_exact(&mut block)?;
        device.channel_mut().write_block(start + done, &block)?;
        report(&progress, count, done + 1);
    }

    Ok(count)
}

fn report(progress: &Option<ProgressCallback>, blocks_total: u64, blocks_done: u64) {
    if let Some(callback) = progress {
        callback(&CopyProgress {
            blocks_total,
            blocks_done,
        });
    }
}

/// A pre-existing destination must be a regular file; a missing one is fine.
fn check_destination(path: &Path) -> Result<()> {
    match std::fs::metadata(path) {
        Ok(metadata) if !metadata.is_file() => {
            Err(CopyError::NotRegularFile(path.display().to_string()))
        }
        _ => Ok(()),
    }
}

fn open_source(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| CopyError::NotReadable {
        path: path.display().to_string(),
        source: e,
    })
}

/// The source must exist and be a regular file. Returns its size.
fn check_source(path: &Path) -> Result<u64> {
    let metadata = std::fs::metadata(path)
        .map_err(|_| CopyError::SourceNotFound(path.display().to_string()))?;
    if !metadata.is_file() {
        return Err(CopyError::NotRegularFile(path.display().to_string()));
    }
    Ok(metadata.len())
}
