//! # Rigidisk Channels
//!
//! Concrete block channels for the rigidisk workspace.
//!
//! This crate provides the media-facing implementations of
//! [`rigidisk_core::BlockChannel`]:
//! - **FileChannel**: seek-per-operation access to a dump file or raw
//!   device node, read-only or read-write
//! - **MmapChannel**: read-only memory-mapped access to a regular file
//!
//! ## Example
//!
//! ```rust,no_run
//! use rigidisk_channels::{ChannelMode, FileChannel};
//! use rigidisk_core::BlockChannel;
//! use std::path::Path;
//!
//! let channel = FileChannel::open(Path::new("disk.hdf"), ChannelMode::ReadOnly).unwrap();
//! println!("Channel type: {}", channel.identify());
//! println!("Blocks: {}", channel.block_count());
//! ```

pub mod file;
pub mod mmap;

pub use file::{ChannelMode, FileChannel};
pub use mmap::MmapChannel;
