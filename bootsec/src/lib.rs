//! Table-driven decoding of boot sectors.
//!
//! Every record type is described once by a [`FieldTable`]: named byte
//! ranges with optional constraints. [`decode`] turns a table and a raw
//! buffer into a [`DecodedRecord`]; [`check`] validates it on request.
//!
//! Field values are built by folding the bytes in buffer order, big-endian
//! style, for every field. Fields stored little-endian on disk (sector
//! counts, `bytes_per_sector`, ...) therefore read byte-swapped. This is
//! kept as is; the textual dump depends on it.

#![no_std]

extern crate alloc;

mod error;
mod field;
pub mod mbr;
mod record;
mod value;
pub mod volume;

pub use self::{
    error::{ConstraintViolation, Error},
    field::{Constraint, FieldSpec, FieldTable, check, decode},
    mbr::{Mbr, PartitionEntry},
    record::{DecodedRecord, Record, format_hex},
    value::FieldValue,
    volume::Fat32Vbr,
};

pub type Result<T, E = Error> = core::result::Result<T, E>;
