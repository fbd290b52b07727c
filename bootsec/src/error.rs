use derive_more::Display;

use crate::{Constraint, FieldValue};

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Error {
    /// The buffer does not reach the end of the last field of a table.
    #[display(fmt = "{} needs {} bytes, buffer holds {}", record, needed, actual)]
    OutOfRange {
        record: &'static str,
        needed: usize,
        actual: usize,
    },
}

impl core::error::Error for Error {}

/// A decoded field whose value falls outside its declared [`Constraint`].
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display(fmt = "{}: expected {}, found {}", field, constraint, value)]
pub struct ConstraintViolation {
    pub field: &'static str,
    pub constraint: Constraint,
    pub value: FieldValue,
}
