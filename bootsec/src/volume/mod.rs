//! Volume layout
//!
//! Only the boot sector of a FAT32 volume (the VBR with its BIOS Parameter
//! Block) is decoded; the FAT and data areas are never touched.

mod bpb;

pub use self::bpb::{FAT32_VBR, Fat32Vbr};
