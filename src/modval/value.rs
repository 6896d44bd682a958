#![forbid(unsafe_code)]

use core::fmt;

use num_bigint_dig::BigUint;
use num_traits::{ToPrimitive, Zero};
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::traits::PublicKeyParts;
use rsa::RsaPrivateKey;

use super::key::KeyMaterial;
use super::validity::{verify_exponent, verify_key, verify_key_and_value, KeyFault};
use super::ModValError;
use crate::config::CryptoConfig;
use crate::entropy::EntropyPool;

/// Key generations allowed by [`ModularValue::new_random`] before giving up.
pub const DEFAULT_KEYGEN_ATTEMPTS: u32 = 16;

/// An element of ℤ/nℤ under a fixed RSA public exponent.
///
/// Values are mutated in place. Binary operations only accept a value from
/// the same group (equal modulus and exponent); whether either side holds the
/// private key does not matter.
#[derive(Clone)]
pub struct ModularValue {
    key: KeyMaterial,
    value: BigUint,
}

impl ModularValue {
    /// Creates a public-only value from an encoded modulus `n`, exponent `e`
    /// and encoded initial value `v` (empty for zero).
    pub fn new(n: &[u8], e: u64, v: &[u8]) -> Result<Self, ModValError> {
        if n.len() < 2 {
            return Err(KeyFault::ModulusTooShort.into());
        }
        if let Some(fault) = verify_exponent(e) {
            return Err(fault.into());
        }
        if let Some(fault) = verify_key_and_value(n, v) {
            return Err(fault.into());
        }
        Ok(Self {
            key: KeyMaterial::Public { modulus: BigUint::from_bytes_be(n), exponent: e },
            value: BigUint::from_bytes_be(v),
        })
    }

    /// Generates a fresh key pair with a `key_bytes * 8`-bit modulus and
    /// public exponent exactly `e`. The stored value starts at zero.
    pub fn new_random(key_bytes: usize, e: u64, pool: &mut EntropyPool) -> Result<Self, ModValError> {
        Self::new_random_bounded(key_bytes, e, pool, DEFAULT_KEYGEN_ATTEMPTS)
    }

    /// [`ModularValue::new_random`] with the key size, exponent and attempt
    /// bound taken from `config`.
    pub fn generate(config: &CryptoConfig, pool: &mut EntropyPool) -> Result<Self, ModValError> {
        Self::new_random_bounded(config.key_bytes, config.public_exponent, pool, config.max_keygen_attempts)
    }

    fn new_random_bounded(
        key_bytes: usize,
        e: u64,
        pool: &mut EntropyPool,
        max_attempts: u32,
    ) -> Result<Self, ModValError> {
        if key_bytes < 2 {
            return Err(KeyFault::ModulusTooShort.into());
        }
        if let Some(fault) = verify_exponent(e) {
            return Err(fault.into());
        }
        let mut rng = pool.rng()?;
        let exp = BigUint::from(e);
        let bits = key_bytes * 8;

        // The generator is asked for `e`, but only a key that actually carries
        // it (at the full bit length) is accepted.
        for attempt in 1..=max_attempts {
            let key = RsaPrivateKey::new_with_exp(&mut rng, bits, &exp).map_err(|err| {
                log::warn!("RSA key generation failed: {}", err);
                ModValError::KeyGeneration
            })?;
            if key.e() == &exp && key.n().bits() == bits {
                log::debug!("generated {}-bit RSA key with e={} (attempt {})", bits, e, attempt);
                return Ok(Self {
                    key: KeyMaterial::KeyPair { key: Box::new(key), exponent: e },
                    value: BigUint::zero(),
                });
            }
            log::warn!("generated key does not match e={} / {} bits, retrying ({}/{})", e, bits, attempt, max_attempts);
        }
        Err(ModValError::KeyGeneration)
    }

    /// Rebuilds a key-pair value from [`ModularValue::private_key_encoding`]
    /// output. The stored value starts at zero.
    pub fn from_private_encoding(bytes: &[u8]) -> Result<Self, ModValError> {
        let key = RsaPrivateKey::from_pkcs1_der(bytes).map_err(|_| ModValError::DecodeError)?;
        let exponent = key.e().to_u64().ok_or(ModValError::DecodeError)?;
        if let Some(fault) = verify_key(&key.n().to_bytes_be()) {
            return Err(fault.into());
        }
        if let Some(fault) = verify_exponent(exponent) {
            return Err(fault.into());
        }
        Ok(Self {
            key: KeyMaterial::KeyPair { key: Box::new(key), exponent },
            value: BigUint::zero(),
        })
    }

    /// Applies the public function: `value = value^e mod n`.
    pub fn encrypt(&mut self) {
        self.value = self.key.apply(&self.value);
    }

    /// Removes a signature; identical to [`ModularValue::encrypt`].
    pub fn undo_signature(&mut self) {
        self.encrypt();
    }

    /// Applies the private function: `value = value^d mod n`.
    pub fn decrypt(&mut self) -> Result<(), ModValError> {
        self.value = self.key.invert(&self.value)?;
        Ok(())
    }

    /// Signs the stored value; identical to [`ModularValue::decrypt`].
    pub fn sign(&mut self) -> Result<(), ModValError> {
        self.decrypt()
    }

    /// `value = value * other.value mod n`.
    pub fn multiply(&mut self, other: &ModularValue) -> Result<(), ModValError> {
        self.check_compatible(other)?;
        self.value = self.key.multiply(&self.value, &other.value);
        Ok(())
    }

    /// `value = value * other.value^-1 mod n`.
    pub fn divide(&mut self, other: &ModularValue) -> Result<(), ModValError> {
        self.check_compatible(other)?;
        let inverse = self.key.inverse(&other.value).ok_or(ModValError::NotInvertible)?;
        self.value = self.key.multiply(&self.value, &inverse);
        Ok(())
    }

    /// Copies the value of a compatible element.
    pub fn set_value(&mut self, other: &ModularValue) -> Result<(), ModValError> {
        self.check_compatible(other)?;
        self.value = other.value.clone();
        Ok(())
    }

    /// Sets the value from a big-endian encoding.
    ///
    /// Only the decoded integer is checked, so leading zero bytes are
    /// tolerated. Prefer [`ModularValue::set_value`], which also checks the group.
    pub fn set_value_from_encoding(&mut self, bytes: &[u8]) -> Result<(), ModValError> {
        let value = BigUint::from_bytes_be(bytes);
        if &value >= self.key.modulus() {
            return Err(ModValError::ValueTooLarge);
        }
        self.value = value;
        Ok(())
    }

    /// Replaces the value with a uniformly random element below the modulus,
    /// drawn from `pool` by rejection sampling.
    pub fn randomize(&mut self, pool: &mut EntropyPool) -> Result<(), ModValError> {
        let n = self.modulus_bytes();
        loop {
            let candidate = pool.get(n.len())?;
            if verify_key_and_value(&n, &candidate).is_none() {
                self.value = BigUint::from_bytes_be(&candidate);
                return Ok(());
            }
        }
    }

    /// Encoded modulus, `byte_len()` bytes.
    pub fn modulus_bytes(&self) -> Vec<u8> {
        encode_fixed(self.key.modulus(), self.byte_len())
    }

    /// Encoded value, left-padded to `byte_len()` bytes.
    pub fn value_bytes(&self) -> Vec<u8> {
        encode_fixed(&self.value, self.byte_len())
    }

    /// Length of the modulus in bytes; the width of every encoded element.
    pub fn byte_len(&self) -> usize {
        self.key.byte_len()
    }

    pub fn exponent(&self) -> u64 {
        self.key.exponent()
    }

    pub fn has_private_key(&self) -> bool {
        self.key.is_private()
    }

    /// PKCS#1 DER encoding of the private key.
    pub fn private_key_encoding(&self) -> Result<Vec<u8>, ModValError> {
        self.key.private_key_der()
    }

    /// True iff `other` has the same modulus and exponent.
    pub fn is_compatible(&self, other: &ModularValue) -> bool {
        self.key.same_group(&other.key)
    }

    /// Copy of this element without the private key.
    pub fn to_public(&self) -> ModularValue {
        ModularValue {
            key: KeyMaterial::Public {
                modulus: self.key.modulus().clone(),
                exponent: self.key.exponent(),
            },
            value: self.value.clone(),
        }
    }

    pub(crate) fn is_invertible(&self) -> bool {
        self.key.inverse(&self.value).is_some()
    }

    fn check_compatible(&self, other: &ModularValue) -> Result<(), ModValError> {
        if !self.is_compatible(other) {
            return Err(ModValError::IncompatibleGroup);
        }
        Ok(())
    }
}

impl fmt::Debug for ModularValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModularValue")
            .field("modulus", &hex::encode(self.modulus_bytes()))
            .field("exponent", &self.exponent())
            .field("private_key", &self.has_private_key())
            .finish()
    }
}

// Big-endian encoding of `x` left-padded to `len` bytes. Requires x < 256^len.
fn encode_fixed(x: &BigUint, len: usize) -> Vec<u8> {
    let mut out = vec![0u8; len];
    if !x.is_zero() {
        let digits = x.to_bytes_be();
        out[len - digits.len()..].copy_from_slice(&digits);
    }
    out
}
