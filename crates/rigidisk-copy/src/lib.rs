//! # Rigidisk Copy
//!
//! Bulk block movers for RDB media.
//!
//! Once discovery has produced a device, these routines move raw block
//! payloads between the device and flat files:
//! - **export_range / import_range**: an explicit block range
//! - **export_volume / import_volume**: a range resolved from a 1-based
//!   partition number
//!
//! Copies run one block at a time and report percent progress through a
//! synchronous callback after every block. Partition tables themselves are
//! never written; only block payloads move.

pub mod copier;
pub mod error;
pub mod progress;

pub use copier::{export_range, export_volume, import_range, import_volume};
pub use error::{CopyError, Result};
pub use progress::{CopyProgress, ProgressCallback};
