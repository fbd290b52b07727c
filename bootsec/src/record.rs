use alloc::collections::BTreeMap;
use alloc::collections::btree_map;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::{ConstraintViolation, FieldTable, FieldValue};

/// Width of the name column in textual dumps.
const NAME_WIDTH: usize = 30;

/// `0x` followed by at least eight upper-case hex digits.
pub fn format_hex(value: u64) -> String {
    format!("0x{value:08X}")
}

/// Field values of one record, keyed and iterated by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedRecord {
    fields: BTreeMap<&'static str, FieldValue>,
}

impl DecodedRecord {
    pub(crate) fn insert(&mut self, name: &'static str, value: FieldValue) {
        self.fields.insert(name, value);
    }

    /// `None` for names the record's table does not declare.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Like [`get`](Self::get), also `None` for values wider than 64 bits.
    pub fn get_u64(&self, name: &str) -> Option<u64> {
        self.get(name).and_then(FieldValue::to_u64)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in ascending name order.
    pub fn iter(&self) -> btree_map::Iter<'_, &'static str, FieldValue> {
        self.fields.iter()
    }

    /// One line per field, sorted by name; `present` may replace a rendered value.
    pub(crate) fn write_with(
        &self,
        f: &mut fmt::Formatter<'_>,
        present: impl Fn(&str, &FieldValue) -> Option<String>,
    ) -> fmt::Result {
        for (name, value) in self.iter() {
            match present(*name, value) {
                Some(shown) => writeln!(f, "{name:>NAME_WIDTH$} {shown}")?,
                None => writeln!(f, "{name:>NAME_WIDTH$} {value}")?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for DecodedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_with(f, |_, _| None)
    }
}

impl<'a> IntoIterator for &'a DecodedRecord {
    type Item = (&'a &'static str, &'a FieldValue);
    type IntoIter = btree_map::Iter<'a, &'static str, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A record decoded through a [`FieldTable`].
pub trait Record {
    fn table(&self) -> &'static FieldTable;

    fn fields(&self) -> &DecodedRecord;

    /// Replacement text for `name` in the dump, if the record shows it
    /// differently from the raw integer.
    fn present(&self, _name: &str, _value: &FieldValue) -> Option<String> {
        None
    }

    fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields().get(name)
    }

    /// Validates against the record's own table. Never called implicitly.
    fn check(&self) -> Vec<ConstraintViolation> {
        self.table().check(self.fields())
    }

    fn write_fields(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fields()
            .write_with(f, |name, value| self.present(name, value))
    }
}
