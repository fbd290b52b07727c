use alloc::vec::Vec;
use core::fmt;

use crate::{ConstraintViolation, DecodedRecord, Error, FieldValue, Result};

/// Value a decoded field is expected to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    Unconstrained,
    ExactValue(u64),
    /// Inclusive on both ends.
    Range(u64, u64),
}

impl Constraint {
    pub fn is_satisfied_by(&self, value: &FieldValue) -> bool {
        match *self {
            Self::Unconstrained => true,
            Self::ExactValue(expected) => *value == expected,
            Self::Range(min, max) => value
                .to_u64()
                .is_some_and(|value| (min..=max).contains(&value)),
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unconstrained => f.write_str("anything"),
            Self::ExactValue(value) => write!(f, "{value:#X}"),
            Self::Range(min, max) => write!(f, "{min:#X}..={max:#X}"),
        }
    }
}

/// A named byte range `[start, end)` within a record.
///
/// Ranges of different fields may overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub start: usize,
    pub end: usize,
    pub constraint: Constraint,
}

impl FieldSpec {
    pub const fn new(name: &'static str, start: usize, end: usize) -> Self {
        Self {
            name,
            start,
            end,
            constraint: Constraint::Unconstrained,
        }
    }

    pub const fn exact(self, value: u64) -> Self {
        Self {
            constraint: Constraint::ExactValue(value),
            ..self
        }
    }

    pub const fn range(self, min: u64, max: u64) -> Self {
        Self {
            constraint: Constraint::Range(min, max),
            ..self
        }
    }
}

/// The layout of one record type.
#[derive(Debug)]
pub struct FieldTable {
    /// Record type name, used in errors and logs.
    pub name: &'static str,
    /// Nominal size of the record in bytes.
    pub len: usize,
    pub fields: &'static [FieldSpec],
}

impl FieldTable {
    /// Smallest buffer every field of the table fits in.
    pub fn required_len(&self) -> usize {
        self.fields.iter().map(|spec| spec.end).max().unwrap_or(0)
    }

    /// Every range is non-empty and inside the record, and no name repeats.
    pub fn is_well_formed(&self) -> bool {
        self.fields.iter().enumerate().all(|(i, spec)| {
            spec.start < spec.end
                && spec.end <= self.len
                && self.fields[..i].iter().all(|prev| prev.name != spec.name)
        })
    }

    pub fn decode(&self, buf: &[u8]) -> Result<DecodedRecord> {
        decode(self, buf)
    }

    pub fn check(&self, record: &DecodedRecord) -> Vec<ConstraintViolation> {
        check(self, record)
    }
}

/// Folds every field of `table` out of `buf`.
///
/// Fails before reading any field if `buf` is too short, so a partial
/// record is never produced.
pub fn decode(table: &FieldTable, buf: &[u8]) -> Result<DecodedRecord> {
    debug_assert!(table.is_well_formed(), "malformed table {}", table.name);

    let needed = table.required_len();
    if buf.len() < needed {
        return Err(Error::OutOfRange {
            record: table.name,
            needed,
            actual: buf.len(),
        });
    }

    let mut record = DecodedRecord::default();
    for spec in table.fields {
        let value = FieldValue::new(&buf[spec.start..spec.end]);
        log::trace!("{}.{}[{:#x}..{:#x}] = {value}", table.name, spec.name, spec.start, spec.end);
        record.insert(spec.name, value);
    }
    log::debug!("decoded {} with {} fields", table.name, record.len());

    Ok(record)
}

/// Collects every field of `record` that breaks its constraint in `table`.
///
/// A field missing from `record` is skipped.
pub fn check(table: &FieldTable, record: &DecodedRecord) -> Vec<ConstraintViolation> {
    table
        .fields
        .iter()
        .filter_map(|spec| {
            let value = record.get(spec.name)?;
            (!spec.constraint.is_satisfied_by(value)).then(|| ConstraintViolation {
                field: spec.name,
                constraint: spec.constraint,
                value: value.clone(),
            })
        })
        .inspect(|violation| log::debug!("{}: {violation}", table.name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{Constraint, FieldSpec, FieldTable, check, decode};
    use crate::{Error, FieldValue};

    static SAMPLE: FieldTable = FieldTable {
        name: "sample",
        len: 4,
        fields: &[
            FieldSpec::new("head", 0, 2).exact(0x0102),
            FieldSpec::new("tail", 2, 4).range(0x10, 0x20),
            FieldSpec::new("middle", 1, 3),
        ],
    };

    #[test]
    fn overlapping_ranges_decode() {
        let record = decode(&SAMPLE, &[0x01, 0x02, 0x00, 0x15]).unwrap();
        assert_eq!(3, record.len());
        assert_eq!(Some(0x0102), record.get_u64("head"));
        assert_eq!(Some(0x0200), record.get_u64("middle"));
        assert_eq!(Some(0x0015), record.get_u64("tail"));
        assert!(check(&SAMPLE, &record).is_empty());
    }

    #[test]
    fn short_buffer_is_out_of_range() {
        assert_eq!(
            Err(Error::OutOfRange {
                record: "sample",
                needed: 4,
                actual: 3
            }),
            decode(&SAMPLE, &[0; 3])
        );
    }

    #[test]
    fn longer_buffer_is_accepted() {
        assert!(decode(&SAMPLE, &[0; 16]).is_ok());
    }

    #[test]
    fn violations_are_all_reported() {
        let record = decode(&SAMPLE, &[0x02, 0x01, 0x00, 0x21]).unwrap();
        let violations = check(&SAMPLE, &record);
        let fields: alloc::vec::Vec<_> = violations.iter().map(|v| v.field).collect();
        assert_eq!(["head", "tail"], fields.as_slice());
        assert_eq!(Constraint::Range(0x10, 0x20), violations[1].constraint);
    }

    #[test]
    fn constraints() {
        let wide = FieldValue::new(&[1, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert!(Constraint::Unconstrained.is_satisfied_by(&wide));
        assert!(!Constraint::Range(0, u64::MAX).is_satisfied_by(&wide));
        assert!(Constraint::Range(2, 2).is_satisfied_by(&FieldValue::new(&[2])));
        assert!(!Constraint::ExactValue(0).is_satisfied_by(&FieldValue::new(&[1])));
    }

    #[test]
    fn malformed_tables() {
        static EMPTY_RANGE: FieldTable = FieldTable {
            name: "bad",
            len: 4,
            fields: &[FieldSpec::new("a", 2, 2)],
        };
        static DUPLICATE: FieldTable = FieldTable {
            name: "bad",
            len: 4,
            fields: &[FieldSpec::new("a", 0, 1), FieldSpec::new("a", 1, 2)],
        };
        static PAST_END: FieldTable = FieldTable {
            name: "bad",
            len: 4,
            fields: &[FieldSpec::new("a", 0, 5)],
        };
        assert!(SAMPLE.is_well_formed());
        assert!(!EMPTY_RANGE.is_well_formed());
        assert!(!DUPLICATE.is_well_formed());
        assert!(!PAST_END.is_well_formed());
    }
}
