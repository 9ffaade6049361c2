//! Volume: the read-only projection over one partition block

use std::fmt;

use crate::blocks::PartitionBlock;

/// A volume models one Amiga partition.
///
/// All accessors are pure projections over the decoded partition block; the
/// block was validated and materialized during discovery, so none of them
/// perform I/O or fail.
#[derive(Debug, Clone)]
pub struct Volume {
    part: PartitionBlock,
}

impl Volume {
    pub(crate) fn new(part: PartitionBlock) -> Self {
        Self { part }
    }

    /// Name of the volume as recorded in the partition block
    pub fn name(&self) -> &str {
        &self.part.drive_name
    }

    /// First block of the volume on the device
    pub fn start_block(&self) -> u64 {
        let g = &self.part.geometry;
        g.low_cyl as u64 * g.blocks_per_track as u64 * g.surfaces as u64
    }

    /// Number of blocks the volume spans
    pub fn block_count(&self) -> u64 {
        let g = &self.part.geometry;
        // Degenerate geometry (high_cyl below low_cyl, zero tracks or
        // surfaces) saturates to zero instead of underflowing.
        let cylinders = g.high_cyl.saturating_sub(g.low_cyl) as u64 + 1;
        (cylinders * g.blocks_per_track as u64 * g.surfaces as u64).saturating_sub(1)
    }

    /// Declared block size of the volume in bytes
    pub fn bytes_per_block(&self) -> u32 {
        self.part.geometry.size_block
    }

    /// Boot priority of the volume
    pub fn boot_priority(&self) -> i32 {
        self.part.geometry.boot_priority
    }

    /// The volume type, rendered as three characters, a backslash, and the
    /// low byte as a digit: a dos_type of `DOS\x03` becomes `DOS\3`.
    pub fn type_tag(&self) -> String {
        let dos_type = self.part.geometry.dos_type;
        let mut tag = String::with_capacity(5);
        tag.push(((dos_type >> 24) & 0xFF) as u8 as char);
        tag.push(((dos_type >> 16) & 0xFF) as u8 as char);
        tag.push(((dos_type >> 8) & 0xFF) as u8 as char);
        tag.push('\\');
        tag.push(((dos_type & 0xFF) as u8).wrapping_add(b'0') as char);
        tag
    }

    /// The decoded partition block backing this volume
    pub fn partition_block(&self) -> &PartitionBlock {
        &self.part
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [start {}, {} blocks, {}]",
            self.name(),
            self.start_block(),
            self.block_count(),
            self.type_tag()
        )
    }
}
