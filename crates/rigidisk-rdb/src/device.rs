//! Device discovery: locate the rigid disk block, walk the partition chain

use std::fmt;

use rigidisk_core::{verify_block_sum, Block, BlockChannel, Error, Result, BLOCK_SIZE};

use crate::blocks::{
    block_id, declared_longs, BootBlock, PartitionBlock, RigidDiskBlock, BOOT_ID, END_OF_CHAIN,
    PART_ID, RDSK_ID, SCAN_BLOCKS,
};
use crate::volume::Volume;

/// Upper bound on chain length. A chain that loops back onto itself would
/// otherwise walk forever; hitting the cap truncates with `ChainEnd::Overflow`.
const MAX_CHAIN_NODES: usize = 256;

/// Why the partition chain walk stopped.
///
/// Only `Sentinel` is a clean termination; the others record an absorbed
/// corruption that truncated the chain at the named block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainEnd {
    /// The end-of-chain sentinel was reached
    Sentinel,
    /// A chain node could not be read
    ReadFailed(u32),
    /// A chain pointer led to a block without the partition tag
    ForeignBlock(u32),
    /// A tagged chain node failed checksum validation
    BadChecksum(u32),
    /// The chain exceeded the node cap (cyclic or absurdly long)
    Overflow,
}

impl fmt::Display for ChainEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainEnd::Sentinel => write!(f, "end of chain"),
            ChainEnd::ReadFailed(block) => write!(f, "unreadable chain node at block {}", block),
            ChainEnd::ForeignBlock(block) => {
                write!(f, "chain pointed at a foreign block at {}", block)
            }
            ChainEnd::BadChecksum(block) => {
                write!(f, "chain node at block {} failed checksum", block)
            }
            ChainEnd::Overflow => write!(f, "chain exceeded {} nodes", MAX_CHAIN_NODES),
        }
    }
}

/// A device models one persistent storage medium: a dump file, a raw device
/// node, or anything else a [`BlockChannel`] can address.
///
/// Discovery runs exactly once, at construction. For partitioned media the
/// device holds one [`Volume`] per chain node, in chain order; media without
/// a recognizable table simply report zero volumes. The channel is owned
/// exclusively for the device's lifetime.
pub struct Device {
    channel: Box<dyn BlockChannel>,
    rdb: Option<RigidDiskBlock>,
    boot: Option<BootBlock>,
    volumes: Vec<Volume>,
    chain_end: ChainEnd,
}

impl Device {
    /// Open a device over a channel and run discovery.
    ///
    /// Discovery absorbs corruption and read failures into "fewer volumes
    /// found" and never fails: a medium with no rigid disk block is a valid
    /// device with zero volumes.
    pub fn discover(mut channel: Box<dyn BlockChannel>) -> Self {
        let rdb = scan_window(channel.as_mut(), RDSK_ID).map(|(index, block)| {
            tracing::debug!(block = index, "found rigid disk block");
            RigidDiskBlock::decode(&block)
        });

        let (volumes, chain_end) = match &rdb {
            Some(rdb) => walk_chain(channel.as_mut(), rdb.partition_list),
            None => {
                tracing::debug!("no rigid disk block in scan window");
                (Vec::new(), ChainEnd::Sentinel)
            }
        };

        let boot = scan_window(channel.as_mut(), BOOT_ID).map(|(index, block)| {
            tracing::debug!(block = index, "found boot-code block");
            BootBlock::decode(&block)
        });

        Self {
            channel,
            rdb,
            boot,
            volumes,
            chain_end,
        }
    }

    /// Whether a valid rigid disk block was found
    pub fn has_table(&self) -> bool {
        self.rdb.is_some()
    }

    /// The decoded rigid disk block, if one was found
    pub fn rdb(&self) -> Option<&RigidDiskBlock> {
        self.rdb.as_ref()
    }

    /// Whether a valid boot-code block was found. Independent of the
    /// partition table: a medium can carry either without the other.
    pub fn has_boot_code(&self) -> bool {
        self.boot.is_some()
    }

    /// The decoded boot-code block header, if one was found
    pub fn boot_block(&self) -> Option<&BootBlock> {
        self.boot.as_ref()
    }

    /// Number of discovered volumes
    pub fn volume_count(&self) -> usize {
        self.volumes.len()
    }

    /// The discovered volumes, in chain order
    pub fn volumes(&self) -> &[Volume] {
        &self.volumes
    }

    /// Pick a volume by partition number. The first partition is number 1.
    ///
    /// # Errors
    ///
    /// Fails with the valid range if `partition` is outside
    /// `[1, volume_count()]`.
    pub fn volume_number(&self, partition: usize) -> Result<&Volume> {
        let count = self.volume_count();
        if partition < 1 || partition > count {
            return Err(Error::VolumeRange {
                requested: partition,
                count,
            });
        }
        Ok(&self.volumes[partition - 1])
    }

    /// Why the chain walk stopped. `ChainEnd::Sentinel` means the table was
    /// complete; anything else records an absorbed truncation.
    pub fn chain_end(&self) -> ChainEnd {
        self.chain_end
    }

    /// Total size of the medium in blocks, delegated to the channel
    pub fn block_count(&self) -> u64 {
        self.channel.block_count()
    }

    /// Direct access to the underlying channel, for bulk block movers
    pub fn channel_mut(&mut self) -> &mut dyn BlockChannel {
        self.channel.as_mut()
    }
}

/// Scan the bounded window at the start of the medium for a block carrying
/// `id` and a valid checksum. Unreadable blocks are skipped, not fatal; the
/// first block passing both checks wins.
fn scan_window(channel: &mut dyn BlockChannel, id: u32) -> Option<(u64, Block)> {
    let mut block = [0u8; BLOCK_SIZE];
    for index in 0..SCAN_BLOCKS {
        if let Err(e) = channel.read_block(index, &mut block) {
            tracing::debug!(block = index, error = %e, "scan skipping unreadable block");
            continue;
        }
        if block_id(&block) != id {
            continue;
        }
        if !verify_block_sum(&block, declared_longs(&block)) {
            tracing::warn!(block = index, "tagged block failed checksum, scan continues");
            continue;
        }
        return Some((index, block));
    }
    None
}

/// Walk the partition chain from `first`, materializing one volume per
/// validated node.
///
/// Corruption truncates rather than aborts: whatever was validated before
/// the bad node is kept. A checksum failure on a tagged node is a hard stop
/// since its `next` pointer cannot be trusted.
fn walk_chain(channel: &mut dyn BlockChannel, first: u32) -> (Vec<Volume>, ChainEnd) {
    let mut volumes = Vec::new();
    let mut next = first;
    let mut block = [0u8; BLOCK_SIZE];

    let end = loop {
        if next == END_OF_CHAIN {
            break ChainEnd::Sentinel;
        }
        if volumes.len() >= MAX_CHAIN_NODES {
            tracing::warn!("partition chain exceeded {} nodes, truncating", MAX_CHAIN_NODES);
            break ChainEnd::Overflow;
        }
        if let Err(e) = channel.read_block(next as u64, &mut block) {
            tracing::warn!(block = next, error = %e, "chain node unreadable, truncating");
            break ChainEnd::ReadFailed(next);
        }
        if block_id(&block) != PART_ID {
            tracing::warn!(block = next, "expected partition tag, truncating");
            break ChainEnd::ForeignBlock(next);
        }
        if !verify_block_sum(&block, declared_longs(&block)) {
            tracing::warn!(block = next, "partition block failed checksum, truncating");
            break ChainEnd::BadChecksum(next);
        }

        let part = PartitionBlock::decode(&block);
        tracing::debug!(block = next, name = %part.drive_name, "validated partition block");
        next = part.next;
        volumes.push(Volume::new(part));
    };

    (volumes, end)
}
