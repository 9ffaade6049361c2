//! # Rigidisk RDB
//!
//! Rigid Disk Block partition-table discovery for the rigidisk workspace.
//!
//! Amiga media carry their partition table in a self-describing header, the
//! rigid disk block, stored somewhere within the first 16 blocks of the
//! medium. The header points at a singly-linked chain of partition blocks;
//! every structure is big-endian and validated by a shared sum-to-zero
//! checksum. This crate locates the header, walks the chain, and exposes the
//! result as an ordered list of [`Volume`] projections on a [`Device`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use rigidisk_channels::{ChannelMode, FileChannel};
//! use rigidisk_rdb::Device;
//! use std::path::Path;
//!
//! let channel = FileChannel::open(Path::new("disk.hdf"), ChannelMode::ReadOnly).unwrap();
//! let device = Device::discover(Box::new(channel));
//!
//! println!("{} partitions", device.volume_count());
//! for volume in device.volumes() {
//!     println!("  {}", volume);
//! }
//! ```

pub mod blocks;
pub mod device;
pub mod volume;

pub use blocks::{
    BootBlock, PartitionBlock, PartitionGeometry, RigidDiskBlock, BOOT_ID, END_OF_CHAIN, PART_ID,
    RDSK_ID,
};
pub use device::{ChainEnd, Device};
pub use volume::Volume;
