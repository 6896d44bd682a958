//! Structural validity rules for encoded moduli and values.
//!
//! Moduli use a canonical-length big-endian encoding: at least two bytes, with
//! the top bit of the first byte set. Values must fit below the modulus.

use core::fmt;

/// Reason an encoded key or value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFault {
    /// Modulus shorter than two bytes.
    ModulusTooShort,
    /// First bit of the modulus is zero.
    ModulusHighBitClear,
    /// Value is not strictly below the modulus.
    ValueOutOfRange,
    /// Public exponent is even.
    ExponentEven,
    /// Public exponent is below 3.
    ExponentTooSmall,
}

impl fmt::Display for KeyFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyFault::ModulusTooShort => write!(f, "key must be at least two bytes long"),
            KeyFault::ModulusHighBitClear => write!(f, "first bit of modulus must be 1"),
            KeyFault::ValueOutOfRange => write!(f, "modulus must be greater than value"),
            KeyFault::ExponentEven => write!(f, "encryption exponent must be odd"),
            KeyFault::ExponentTooSmall => write!(f, "encryption exponent must be at least 3"),
        }
    }
}

/// Checks an encoded modulus. Returns the reason it is invalid, if any.
pub fn verify_key(n: &[u8]) -> Option<KeyFault> {
    if n.len() < 2 {
        return Some(KeyFault::ModulusTooShort);
    }
    if n[0] & 0x80 == 0 {
        return Some(KeyFault::ModulusHighBitClear);
    }
    None
}

/// Checks an encoded modulus and a value meant to live below it.
///
/// The value's encoded length counts: a value longer than the modulus is
/// rejected even if its extra leading bytes are zero.
pub fn verify_key_and_value(n: &[u8], v: &[u8]) -> Option<KeyFault> {
    if let Some(fault) = verify_key(n) {
        return Some(fault);
    }
    if v.len() > n.len() {
        return Some(KeyFault::ValueOutOfRange);
    }
    // Equal-length big-endian strings compare like the integers they encode.
    if v.len() == n.len() && v >= n {
        return Some(KeyFault::ValueOutOfRange);
    }
    None
}

/// Checks a public exponent.
pub fn verify_exponent(e: u64) -> Option<KeyFault> {
    if e & 1 == 0 {
        return Some(KeyFault::ExponentEven);
    }
    if e < 3 {
        return Some(KeyFault::ExponentTooSmall);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_key() {
        assert_eq!(verify_key(&[]), Some(KeyFault::ModulusTooShort));
        assert_eq!(verify_key(&[0xFF]), Some(KeyFault::ModulusTooShort));
        assert_eq!(verify_key(&[0x7F, 0xFF]), Some(KeyFault::ModulusHighBitClear));
        assert_eq!(verify_key(&[0x00, 0x80, 0x01]), Some(KeyFault::ModulusHighBitClear));
        assert_eq!(verify_key(&[0x80, 0x00]), None);
        assert_eq!(verify_key(&[0xC3, 0x5A, 0x11]), None);
    }

    #[test]
    fn test_verify_key_and_value() {
        let n = [0x80u8, 0x01];
        assert_eq!(verify_key_and_value(&n, &[]), None);
        assert_eq!(verify_key_and_value(&n, &[0xFF]), None);
        assert_eq!(verify_key_and_value(&n, &[0x80, 0x00]), None);
        assert_eq!(verify_key_and_value(&n, &[0x80, 0x01]), Some(KeyFault::ValueOutOfRange));
        assert_eq!(verify_key_and_value(&n, &[0xFF, 0x00]), Some(KeyFault::ValueOutOfRange));
        assert_eq!(verify_key_and_value(&n, &[0x00, 0x00, 0x01]), Some(KeyFault::ValueOutOfRange));
        // Key faults are reported before value faults.
        assert_eq!(verify_key_and_value(&[0x01, 0x00], &[0x00]), Some(KeyFault::ModulusHighBitClear));
    }

    #[test]
    fn test_verify_exponent() {
        assert_eq!(verify_exponent(0), Some(KeyFault::ExponentEven));
        assert_eq!(verify_exponent(1), Some(KeyFault::ExponentTooSmall));
        assert_eq!(verify_exponent(2), Some(KeyFault::ExponentEven));
        assert_eq!(verify_exponent(3), None);
        assert_eq!(verify_exponent(65537), None);
        assert_eq!(verify_exponent(65536), Some(KeyFault::ExponentEven));
    }
}
