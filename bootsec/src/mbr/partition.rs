use alloc::borrow::Cow;
use alloc::format;
use alloc::string::String;
use core::fmt;

use crate::{DecodedRecord, FieldSpec, FieldTable, FieldValue, Record, Result, format_hex};

pub const STATUS: &str = "status";
pub const TYPE: &str = "type";
pub const CHS_FIRST: &str = "CHS_address_first";
pub const CHS_LAST: &str = "CHS_address_last";
pub const LBA_FIRST: &str = "LBA_address_first";
pub const SECTORS_COUNT: &str = "sectors_count";

/// Size of one partition table slot.
pub const ENTRY_LEN: usize = 16;

/// `type` and `CHS_address_first` overlap on purpose.
pub static PARTITION_ENTRY: FieldTable = FieldTable {
    name: "PartitionEntry",
    len: ENTRY_LEN,
    fields: &[
        FieldSpec::new(STATUS, 0x0, 0x1),
        FieldSpec::new(TYPE, 0x4, 0x5),
        FieldSpec::new(CHS_FIRST, 0x4, 0x7),
        FieldSpec::new(CHS_LAST, 0x5, 0x8),
        FieldSpec::new(LBA_FIRST, 0x8, 0xC),
        FieldSpec::new(SECTORS_COUNT, 0xC, 0x10),
    ],
};

static TYPE_NAMES: [(u8, &str); 3] = [(0x07, "NTFS"), (0x0B, "FAT32"), (0x83, "Linux")];

/// Name of a partition type code, `Unknown (0x..)` for codes not listed.
pub fn type_name(code: u8) -> Cow<'static, str> {
    TYPE_NAMES
        .iter()
        .find_map(|&(known, name)| (known == code).then_some(Cow::Borrowed(name)))
        .unwrap_or_else(|| Cow::Owned(format!("Unknown (0x{code:X})")))
}

/// One 16-byte slot of the MBR partition table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionEntry {
    fields: DecodedRecord,
}

impl PartitionEntry {
    pub fn new(buf: &[u8]) -> Result<Self> {
        PARTITION_ENTRY.decode(buf).map(|fields| Self { fields })
    }

    /// Every field is at most four bytes wide, so the lookup always narrows.
    fn raw(&self, name: &str) -> u64 {
        self.fields.get_u64(name).unwrap_or_default()
    }

    pub fn status(&self) -> u8 {
        self.raw(STATUS) as u8
    }

    pub fn type_code(&self) -> u8 {
        self.raw(TYPE) as u8
    }

    pub fn type_name(&self) -> Cow<'static, str> {
        type_name(self.type_code())
    }

    pub fn chs_first(&self) -> u32 {
        self.raw(CHS_FIRST) as u32
    }

    pub fn chs_last(&self) -> u32 {
        self.raw(CHS_LAST) as u32
    }

    pub fn lba_first(&self) -> u32 {
        self.raw(LBA_FIRST) as u32
    }

    pub fn sectors_count(&self) -> u32 {
        self.raw(SECTORS_COUNT) as u32
    }

    pub fn chs_first_hex(&self) -> String {
        format_hex(self.chs_first().into())
    }

    pub fn chs_last_hex(&self) -> String {
        format_hex(self.chs_last().into())
    }

    pub fn lba_first_hex(&self) -> String {
        format_hex(self.lba_first().into())
    }
}

impl Record for PartitionEntry {
    fn table(&self) -> &'static FieldTable {
        &PARTITION_ENTRY
    }

    fn fields(&self) -> &DecodedRecord {
        &self.fields
    }

    fn present(&self, name: &str, _value: &FieldValue) -> Option<String> {
        match name {
            TYPE => Some(self.type_name().into_owned()),
            CHS_FIRST => Some(self.chs_first_hex()),
            CHS_LAST => Some(self.chs_last_hex()),
            LBA_FIRST => Some(self.lba_first_hex()),
            _ => None,
        }
    }
}

impl fmt::Display for PartitionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_fields(f)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::{PARTITION_ENTRY, PartitionEntry, type_name};
    use crate::{Error, Record};

    const SLOT: [u8; 16] = [
        0x80, 0x01, 0x02, 0x03, 0x0B, 0xFE, 0xFF, 0xFF, 0x00, 0x00, 0x08, 0x00, 0x00, 0x10, 0x00,
        0x00,
    ];

    #[test]
    fn table() {
        assert!(PARTITION_ENTRY.is_well_formed());
        assert_eq!(16, PARTITION_ENTRY.required_len());
    }

    #[test]
    fn fields() {
        let entry = PartitionEntry::new(&SLOT).unwrap();
        assert_eq!(0x80, entry.status());
        assert_eq!(0x0B, entry.type_code());
        assert_eq!("FAT32", entry.type_name());
        assert_eq!(0x0B_FE_FF, entry.chs_first());
        assert_eq!(0xFE_FF_FF, entry.chs_last());
        assert_eq!(0x0000_0800, entry.lba_first());
        assert_eq!(0x0010_0000, entry.sectors_count());
        assert_eq!("0x000BFEFF", entry.chs_first_hex());
        assert_eq!("0x00FEFFFF", entry.chs_last_hex());
        assert_eq!("0x00000800", entry.lba_first_hex());
        assert!(entry.check().is_empty());
    }

    #[test]
    fn raw_type_survives_presentation() {
        let entry = PartitionEntry::new(&SLOT).unwrap();
        assert_eq!(Some(0x0B), entry.fields().get_u64("type"));
        assert_eq!(None, entry.get("Type"));
    }

    #[test]
    fn type_names() {
        assert_eq!("NTFS", type_name(0x07));
        assert_eq!("Linux", type_name(0x83));
        assert_eq!("Unknown (0x99)", type_name(0x99));
        assert_eq!("Unknown (0x5)", type_name(0x05));
    }

    #[test]
    fn dump() {
        let entry = PartitionEntry::new(&SLOT).unwrap();
        let expected = concat!(
            "             CHS_address_first 0x000BFEFF\n",
            "              CHS_address_last 0x00FEFFFF\n",
            "             LBA_address_first 0x00000800\n",
            "                 sectors_count 1048576\n",
            "                        status 128\n",
            "                          type FAT32\n",
        );
        assert_eq!(expected, entry.to_string());
    }

    #[test]
    fn short_slot() {
        assert!(matches!(
            PartitionEntry::new(&SLOT[..15]),
            Err(Error::OutOfRange { needed: 16, actual: 15, .. })
        ));
    }
}
