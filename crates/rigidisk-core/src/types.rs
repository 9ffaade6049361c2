//! Core types for rigidisk

/// Size of one device block in bytes. RDB media are addressed in fixed
/// 512-byte blocks regardless of the host medium.
pub const BLOCK_SIZE: usize = 512;

/// A 512 byte buffer for block operations
pub type Block = [u8; BLOCK_SIZE];
