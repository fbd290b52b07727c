//! # Block device interface
//!
//! A block device stores data in fixed-size **blocks**: disks, disk images,
//! USB sticks. [`BlockDevice`] abstracts reading them; `bootsec` only ever
//! needs one block at a time.

#![no_std]

use core::any::Any;

use derive_more::Display;

/// Bytes per block. Boot records are exactly one block long.
pub const BLOCK_SIZE: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum BlockError {
    /// The device ended before the block was filled.
    #[display(fmt = "block {} is incomplete", block_id)]
    Incomplete { block_id: usize },
    /// The block's byte offset does not fit the device's address space.
    #[display(fmt = "block {} is out of the device", block_id)]
    OutOfDevice { block_id: usize },
    #[display(fmt = "failed to read block {}", block_id)]
    Io { block_id: usize },
}

impl core::error::Error for BlockError {}

/// Block device driver trait, read-only.
pub trait BlockDevice: Send + Sync + Any {
    /// Fills `buf` from the start of block `block_id`.
    fn read_block(&self, block_id: usize, buf: &mut [u8]) -> Result<(), BlockError>;
}
