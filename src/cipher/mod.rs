//! Length-preserving symmetric encryption.
//!
//! DES-X in CBC mode with ciphertext stealing: the ciphertext is exactly as
//! long as the plaintext, for any plaintext of at least one block.
//!
//! # Components
//! - `desx`: the DES-X block primitive (24-byte key, 8-byte block).
//! - `cts`: CBC with ciphertext stealing over any [`BlockPrimitive`].
//! - `sealed`: one-secret convenience wrapper that derives key and IV.

pub mod desx;
pub mod cts;
pub mod sealed;

use core::fmt;

pub use cts::{CbcCts, DesXCbc};
pub use desx::DesX;

/// Errors for symmetric operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherError {
    /// Key is not the length the primitive expects.
    InvalidKeyLength,
    /// IV is not exactly one block.
    InvalidIvLength,
    /// Message is shorter than one block.
    MessageTooShort,
}

impl fmt::Display for CipherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CipherError::InvalidKeyLength => write!(f, "invalid key length"),
            CipherError::InvalidIvLength => write!(f, "IV must be exactly one block"),
            CipherError::MessageTooShort => write!(f, "message must be at least one block"),
        }
    }
}

impl std::error::Error for CipherError {}

/// A keyed block permutation.
pub trait BlockPrimitive {
    /// Block size in bytes.
    const BLOCK_LEN: usize;

    /// Encrypts one block in place. `block.len()` must equal `BLOCK_LEN`.
    fn encrypt_block(&self, block: &mut [u8]);

    /// Inverse of [`BlockPrimitive::encrypt_block`].
    fn decrypt_block(&self, block: &mut [u8]);
}
