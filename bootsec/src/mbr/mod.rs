//! Master Boot Record: bootstrap code, four partition slots and the boot
//! signature, all in the first sector of a disk.

mod partition;

use alloc::format;
use alloc::vec::Vec;
use core::fmt;

pub use self::partition::{ENTRY_LEN, PARTITION_ENTRY, PartitionEntry, type_name};
use crate::{DecodedRecord, Error, FieldSpec, FieldTable, Record, Result};

pub const BOOTSTRAP: &str = "bootstrap";
pub const SIGNATURE: &str = "signature";

pub const SECTOR_LEN: usize = 0x200;
pub const PARTITION_TABLE: usize = 0x1BE;
pub const PARTITION_COUNT: usize = 4;
pub const BOOT_SIGNATURE: u16 = 0x55AA;

pub static MBR: FieldTable = FieldTable {
    name: "MBR",
    len: SECTOR_LEN,
    fields: &[
        FieldSpec::new(BOOTSTRAP, 0x000, PARTITION_TABLE),
        FieldSpec::new(SIGNATURE, 0x1FE, 0x200).exact(BOOT_SIGNATURE as u64),
    ],
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mbr {
    fields: DecodedRecord,
    /// Slots in table order, always [`PARTITION_COUNT`] of them.
    partitions: Vec<PartitionEntry>,
}

impl Mbr {
    pub fn new(buf: &[u8]) -> Result<Self> {
        let fields = MBR.decode(buf)?;

        let mut partitions = Vec::with_capacity(PARTITION_COUNT);
        for slot in 0..PARTITION_COUNT {
            let start = PARTITION_TABLE + slot * ENTRY_LEN;
            let raw = buf
                .get(start..start + ENTRY_LEN)
                .ok_or(Error::OutOfRange {
                    record: PARTITION_ENTRY.name,
                    needed: start + ENTRY_LEN,
                    actual: buf.len(),
                })?;
            partitions.push(PartitionEntry::new(raw)?);
        }

        Ok(Self { fields, partitions })
    }

    pub fn signature(&self) -> u16 {
        self.fields.get_u64(SIGNATURE).unwrap_or_default() as u16
    }

    /// Only the signature word is checked.
    pub fn is_valid_signature(&self) -> bool {
        self.signature() == BOOT_SIGNATURE
    }

    pub fn bootstrap(&self) -> &[u8] {
        self.fields
            .get(BOOTSTRAP)
            .map(|value| value.as_bytes())
            .unwrap_or_default()
    }

    pub fn partitions(&self) -> &[PartitionEntry] {
        &self.partitions
    }

    pub fn partition(&self, slot: usize) -> Option<&PartitionEntry> {
        self.partitions.get(slot)
    }
}

impl Record for Mbr {
    fn table(&self) -> &'static FieldTable {
        &MBR
    }

    fn fields(&self) -> &DecodedRecord {
        &self.fields
    }
}

impl fmt::Display for Mbr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_fields(f)?;
        for (slot, partition) in self.partitions.iter().enumerate() {
            writeln!(f, "{:-^61}", format!(" Partition {slot} "))?;
            write!(f, "{partition}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{MBR, Mbr, PARTITION_COUNT};

    #[test]
    fn table() {
        assert!(MBR.is_well_formed());
        assert_eq!(0x200, MBR.required_len());
    }

    #[test]
    fn empty_sector() {
        let mbr = Mbr::new(&[0; 512]).unwrap();
        assert_eq!(PARTITION_COUNT, mbr.partitions().len());
        assert_eq!(446, mbr.bootstrap().len());
        assert!(!mbr.is_valid_signature());
        assert!(mbr.partition(PARTITION_COUNT).is_none());
    }
}
