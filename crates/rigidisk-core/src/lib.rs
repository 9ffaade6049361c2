//! # Rigidisk Core
//!
//! Core traits, types, and error handling for working with Rigid Disk Block
//! (RDB) partitioned media.
//!
//! This crate provides the foundational abstractions shared by every other
//! crate in the workspace:
//! - **Block channels**: read/write-by-index access to a storage medium
//! - **Endian codec**: big-endian on-disk integers on any host
//! - **Checksum law**: the sum-to-zero validity rule shared by all RDB
//!   structure variants
//!
//! ## Example
//!
//! ```rust,no_run
//! use rigidisk_core::{Block, BlockChannel, Result, BLOCK_SIZE};
//!
//! fn first_block(channel: &mut dyn BlockChannel) -> Result<Block> {
//!     let mut block = [0u8; BLOCK_SIZE];
//!     channel.read_block(0, &mut block)?;
//!     Ok(block)
//! }
//! ```

pub mod checksum;
pub mod endian;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items
pub use checksum::verify_block_sum;
pub use error::{Error, Result};
pub use traits::BlockChannel;
pub use types::{Block, BLOCK_SIZE};
