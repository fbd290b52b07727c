use alloc::string::String;
use core::fmt;

use crate::{DecodedRecord, FieldSpec, FieldTable, FieldValue, Record, Result, format_hex};

/// Jump instruction to the boot code.
pub const BOOTLOADER: &str = "bootloader";
/// Usually records which system formatted the volume.
pub const SYSTEM_NAME: &str = "system_name";
pub const BYTES_PER_SECTOR: &str = "bytes_per_sector";
pub const SECTOR_PER_CLUSTER: &str = "sector_per_cluster";
/// Sectors in the reserved area.
pub const RESERVED_SECTORS: &str = "reserved_sectors";
/// Number of FATs, should be 2.
pub const FAT_AMOUNT: &str = "fat_amount";
/// FAT32: 0
pub const MAX_ENTRIES: &str = "max_entries";
/// FAT32: 0
pub const SECTOR_COUNT: &str = "sector_count";
/// Media descriptor.
pub const TYPE: &str = "type";
/// FAT32: 0
pub const SECTOR_AMOUNT: &str = "sector_amount";
pub const INT13_SECTOR_PER_TRACK: &str = "int13_sector_per_track";
pub const INT13_HEAD_COUNT: &str = "int13_head_count";
pub const HIDDEN_SECTORS: &str = "hidden_sectors";
/// FAT32: total sectors of the volume.
pub const SECTOR_AMOUNT_EXT: &str = "sector_amount_ext";
pub const FAT32_SECTOR_PER_FAT: &str = "fat32_sector_per_fat";
pub const FAT32_BITSWITCH: &str = "fat32_bitswitch";
pub const FAT32_PARTITION_VERSION: &str = "fat32_partition_version";
/// First cluster of the root directory.
pub const FAT32_CLUSTER_START: &str = "fat32_cluster_start";
/// Sector of the FSINFO structure.
pub const FAT32_SECTORNUMBER: &str = "fat32_sectornumber";
pub const FAT32_VBR_COPY_BEGIN: &str = "fat32_vbr_copy_begin";
pub const FAT32_INT13_DRIVE_NUMBER: &str = "fat32_int13_drive_number";
pub const FAT32_EXTENDED_BOOT_SIG: &str = "fat32_extended_boot_sig";
pub const FAT32_VOLUME_ID: &str = "fat32_volume_id";
/// `NO NAME    ` when the volume has no label.
pub const FAT32_VOLUME_NAME: &str = "fat32_volume_name";
pub const RESERVED_0000: &str = "reserved_0000";
/// `[0x55, 0xAA]`
pub const SIGNATURE: &str = "signature";

pub static FAT32_VBR: FieldTable = FieldTable {
    name: "FAT32 VBR",
    len: 0x200,
    fields: &[
        FieldSpec::new(BOOTLOADER, 0x00, 0x03),
        FieldSpec::new(SYSTEM_NAME, 0x03, 0x08),
        FieldSpec::new(BYTES_PER_SECTOR, 0x0B, 0x0D),
        FieldSpec::new(SECTOR_PER_CLUSTER, 0x0D, 0x0E),
        FieldSpec::new(RESERVED_SECTORS, 0x0E, 0x10),
        FieldSpec::new(FAT_AMOUNT, 0x10, 0x11).exact(2),
        FieldSpec::new(MAX_ENTRIES, 0x11, 0x13).exact(0),
        FieldSpec::new(SECTOR_COUNT, 0x13, 0x15).exact(0),
        FieldSpec::new(TYPE, 0x15, 0x16).range(0xF8, 0xFF),
        FieldSpec::new(SECTOR_AMOUNT, 0x16, 0x18).exact(0),
        FieldSpec::new(INT13_SECTOR_PER_TRACK, 0x18, 0x1A),
        FieldSpec::new(INT13_HEAD_COUNT, 0x1A, 0x1C),
        FieldSpec::new(HIDDEN_SECTORS, 0x1C, 0x20),
        FieldSpec::new(SECTOR_AMOUNT_EXT, 0x20, 0x24),
        FieldSpec::new(FAT32_SECTOR_PER_FAT, 0x24, 0x28),
        FieldSpec::new(FAT32_BITSWITCH, 0x28, 0x2A),
        FieldSpec::new(FAT32_PARTITION_VERSION, 0x2A, 0x2C),
        FieldSpec::new(FAT32_CLUSTER_START, 0x2C, 0x30),
        FieldSpec::new(FAT32_SECTORNUMBER, 0x30, 0x32),
        FieldSpec::new(FAT32_VBR_COPY_BEGIN, 0x32, 0x34),
        FieldSpec::new(FAT32_INT13_DRIVE_NUMBER, 0x40, 0x41),
        FieldSpec::new(FAT32_EXTENDED_BOOT_SIG, 0x42, 0x43),
        FieldSpec::new(FAT32_VOLUME_ID, 0x43, 0x47),
        FieldSpec::new(FAT32_VOLUME_NAME, 0x47, 0x52),
        FieldSpec::new(RESERVED_0000, 0x1FC, 0x1FE).exact(0x0000),
        FieldSpec::new(SIGNATURE, 0x1FE, 0x200).exact(0x55AA),
    ],
};

/// Boot sector of a FAT32 volume.
///
/// Constraints in [`FAT32_VBR`] are only evaluated by [`Record::check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fat32Vbr {
    fields: DecodedRecord,
}

/// Printable ASCII and spaces kept as is, any other byte shown as `.`.
fn text(value: Option<&FieldValue>) -> String {
    value
        .map(|value| {
            value
                .as_bytes()
                .iter()
                .map(|&b| match b {
                    b' ' => ' ',
                    b if b.is_ascii_graphic() => char::from(b),
                    _ => '.',
                })
                .collect()
        })
        .unwrap_or_default()
}

impl Fat32Vbr {
    pub fn new(buf: &[u8]) -> Result<Self> {
        FAT32_VBR.decode(buf).map(|fields| Self { fields })
    }

    /// Folded value of a field no wider than eight bytes.
    fn raw(&self, name: &str) -> u64 {
        self.fields.get_u64(name).unwrap_or_default()
    }

    /// OEM name as text rather than the folded integer.
    pub fn system_name(&self) -> String {
        text(self.fields.get(SYSTEM_NAME))
    }

    pub fn volume_name(&self) -> String {
        text(self.fields.get(FAT32_VOLUME_NAME))
    }

    pub fn cluster_start(&self) -> u32 {
        self.raw(FAT32_CLUSTER_START) as u32
    }

    pub fn cluster_start_hex(&self) -> String {
        format_hex(self.cluster_start().into())
    }

    pub fn bytes_per_sector(&self) -> u16 {
        self.raw(BYTES_PER_SECTOR) as u16
    }

    pub fn sector_per_cluster(&self) -> u8 {
        self.raw(SECTOR_PER_CLUSTER) as u8
    }

    pub fn fat_amount(&self) -> u8 {
        self.raw(FAT_AMOUNT) as u8
    }

    pub fn media_type(&self) -> u8 {
        self.raw(TYPE) as u8
    }

    pub fn volume_id(&self) -> u32 {
        self.raw(FAT32_VOLUME_ID) as u32
    }

    pub fn signature(&self) -> u16 {
        self.raw(SIGNATURE) as u16
    }
}

impl Record for Fat32Vbr {
    fn table(&self) -> &'static FieldTable {
        &FAT32_VBR
    }

    fn fields(&self) -> &DecodedRecord {
        &self.fields
    }

    fn present(&self, name: &str, _value: &FieldValue) -> Option<String> {
        match name {
            SYSTEM_NAME => Some(self.system_name()),
            FAT32_CLUSTER_START => Some(self.cluster_start_hex()),
            _ => None,
        }
    }
}

impl fmt::Display for Fat32Vbr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_fields(f)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::{FAT32_VBR, Fat32Vbr};
    use crate::Record;

    #[test]
    fn table() {
        assert!(FAT32_VBR.is_well_formed());
        assert_eq!(26, FAT32_VBR.fields.len());
        assert_eq!(0x200, FAT32_VBR.required_len());
    }

    #[test]
    fn zeroed_sector_decodes_but_fails_check() {
        let vbr = Fat32Vbr::new(&[0; 512]).unwrap();
        assert_eq!(26, vbr.fields().len());

        let failed: alloc::vec::Vec<_> = vbr.check().iter().map(|v| v.field).collect();
        assert_eq!(["fat_amount", "type", "signature"], failed.as_slice());
    }

    #[test]
    fn text_views() {
        let mut sector = [0u8; 512];
        sector[0x03..0x0B].copy_from_slice(b"MSWIN4.1");
        sector[0x47..0x52].copy_from_slice(b"NO NAME    ");
        let vbr = Fat32Vbr::new(&sector).unwrap();
        assert_eq!("MSWIN", vbr.system_name());
        assert_eq!("NO NAME    ", vbr.volume_name());
    }

    #[test]
    fn control_bytes_keep_one_line_per_field() {
        let mut sector = [0u8; 512];
        sector[0x03..0x08].copy_from_slice(b"AB\nC\xE9");
        sector[0x47..0x52].copy_from_slice(b"\rLABEL\t\0   ");
        let vbr = Fat32Vbr::new(&sector).unwrap();
        assert_eq!("AB.C.", vbr.system_name());
        assert_eq!(".LABEL..   ", vbr.volume_name());

        let dump = vbr.to_string();
        assert_eq!(vbr.fields().len(), dump.lines().count());
        assert!(dump.contains("                   system_name AB.C.\n"));
        // The raw bytes stay untouched behind the text view.
        assert_eq!(Some(0x41420A43E9), vbr.fields().get_u64("system_name"));
    }
}
