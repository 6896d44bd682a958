//! Configuration for the blind-signature primitives.
//!
//! Defines the parameters a host application chooses once and hands to the
//! key-generation and seeding paths.

/// Main configuration structure.
///
/// This struct should be populated by the host application and passed to
/// [`crate::modval::ModularValue::generate`] and
/// [`crate::entropy::global::seed_from_os`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CryptoConfig {
    /// Modulus length in bytes for freshly generated keys (128 = 1024 bits).
    pub key_bytes: usize,

    /// Public RSA exponent; must be odd and at least 3.
    pub public_exponent: u64,

    /// How many key generations may run before giving up on an exact exponent.
    pub max_keygen_attempts: u32,

    /// Bytes read from the OS generator when seeding a pool at start-up.
    /// Credited at full entropy, so 20 bytes clears the 80-bit chunk.
    pub os_seed_bytes: usize,
}

impl Default for CryptoConfig {
    fn default() -> Self {
        Self {
            key_bytes: 128,
            public_exponent: 3,
            max_keygen_attempts: 16,
            os_seed_bytes: 20,
        }
    }
}
