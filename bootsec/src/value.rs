use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Write};

/// Unsigned integer folded from a byte range: `value = (value << 8) | byte`
/// for every byte in buffer order.
///
/// The fold keeps all bytes, so fields wider than 8 bytes (the MBR bootstrap
/// code, the volume label) still have an exact value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldValue {
    bytes: Box<[u8]>,
}

impl FieldValue {
    pub fn new(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// The raw bytes the value was folded from, in buffer order.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// `None` if the value does not fit in 64 bits.
    pub fn to_u64(&self) -> Option<u64> {
        let split = self.bytes.len().saturating_sub(8);
        let (high, low) = self.bytes.split_at(split);
        high.iter()
            .all(|&b| b == 0)
            .then(|| low.iter().fold(0, |value, &b| (value << 8) | u64::from(b)))
    }

    pub fn is_zero(&self) -> bool {
        self.bytes.iter().all(|&b| b == 0)
    }

    /// Decimal digits of values wider than 64 bits.
    ///
    /// Limbs hold base 10^9 digits, least significant first.
    fn wide_decimal(&self) -> String {
        const BASE: u64 = 1_000_000_000;

        let mut limbs: Vec<u32> = Vec::new();
        for &byte in self.bytes.iter() {
            let mut carry = u64::from(byte);
            for limb in limbs.iter_mut() {
                let acc = u64::from(*limb) * 256 + carry;
                *limb = (acc % BASE) as u32;
                carry = acc / BASE;
            }
            while carry > 0 {
                limbs.push((carry % BASE) as u32);
                carry /= BASE;
            }
        }

        let mut digits = String::new();
        let mut iter = limbs.iter().rev();
        if let Some(top) = iter.next() {
            let _ = write!(digits, "{top}");
        }
        for limb in iter {
            let _ = write!(digits, "{limb:09}");
        }
        digits
    }
}

impl PartialEq<u64> for FieldValue {
    fn eq(&self, other: &u64) -> bool {
        self.to_u64() == Some(*other)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_u64() {
            Some(value) => fmt::Display::fmt(&value, f),
            None => f.pad_integral(true, "", &self.wide_decimal()),
        }
    }
}
