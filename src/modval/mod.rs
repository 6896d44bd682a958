//! Blinded RSA group arithmetic.
//!
//! A [`ModularValue`] is one element of ℤ/nℤ bound to an RSA public function
//! `x ↦ x^e mod n`, optionally together with the private function that inverts
//! it. These are the operations a Chaumian blind-signature protocol needs:
//!
//! - `encrypt` / `undo_signature`: apply the public function.
//! - `decrypt` / `sign`: apply the private function (key pair only).
//! - `multiply` / `divide`: group operations between compatible values.
//!
//! # Components
//! - `validity`: structural checks on encoded moduli and values.
//! - `key` (private): public-only vs. key-pair material.
//! - `value`: the mutable group element.
//! - `blind`: client-side blinding and unblinding.

pub mod validity;
mod key;
pub mod value;
pub mod blind;

use core::fmt;

use crate::entropy::EntropyError;

pub use blind::Blinder;
pub use validity::{verify_key, verify_key_and_value, KeyFault};
pub use value::ModularValue;

/// Errors for modular-value operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModValError {
    /// Modulus, exponent or initial value failed a structural check.
    InvalidKey(KeyFault),
    /// Decoded value is not below the modulus.
    ValueTooLarge,
    /// The two values live under different moduli or exponents.
    IncompatibleGroup,
    /// Division by an element without a multiplicative inverse.
    NotInvertible,
    /// Operation needs the private key but only the public key is held.
    PrivateKeyUnavailable,
    /// Malformed private-key encoding.
    DecodeError,
    /// Private-key encoding could not be produced.
    EncodeError,
    /// The entropy pool cannot supply randomness yet.
    NotEnoughEntropy,
    /// Key generation failed or never produced the requested exponent.
    KeyGeneration,
}

impl fmt::Display for ModValError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModValError::InvalidKey(fault) => write!(f, "invalid key: {}", fault),
            ModValError::ValueTooLarge => write!(f, "new value must be less than modulus"),
            ModValError::IncompatibleGroup => {
                write!(f, "values belong to groups with a different modulus or exponent")
            }
            ModValError::NotInvertible => write!(f, "can't divide by a value with no inverse"),
            ModValError::PrivateKeyUnavailable => write!(f, "private key not available"),
            ModValError::DecodeError => write!(f, "malformed private key encoding"),
            ModValError::EncodeError => write!(f, "failed to encode private key"),
            ModValError::NotEnoughEntropy => write!(f, "not enough entropy"),
            ModValError::KeyGeneration => write!(f, "RSA key generation failed"),
        }
    }
}

impl std::error::Error for ModValError {}

impl From<KeyFault> for ModValError {
    fn from(fault: KeyFault) -> Self {
        ModValError::InvalidKey(fault)
    }
}

impl From<EntropyError> for ModValError {
    fn from(_: EntropyError) -> Self {
        ModValError::NotEnoughEntropy
    }
}
