#![forbid(unsafe_code)]

use num_bigint_dig::{BigUint, ModInverse, ToBigUint};
use rsa::pkcs1::EncodeRsaPrivateKey;
use rsa::traits::{PrivateKeyParts, PublicKeyParts};
use rsa::RsaPrivateKey;

use super::ModValError;

// KeyMaterial is the RSA function behind a group element.
// Public material can only apply x^e mod n; a key pair can also invert it.
// Group identity is (modulus, exponent) regardless of which variant holds it.

#[derive(Clone)]
pub enum KeyMaterial {
    Public { modulus: BigUint, exponent: u64 },
    KeyPair { key: Box<RsaPrivateKey>, exponent: u64 },
}

impl KeyMaterial {
    pub fn modulus(&self) -> &BigUint {
        match self {
            KeyMaterial::Public { modulus, .. } => modulus,
            KeyMaterial::KeyPair { key, .. } => key.n(),
        }
    }

    pub fn exponent(&self) -> u64 {
        match self {
            KeyMaterial::Public { exponent, .. } | KeyMaterial::KeyPair { exponent, .. } => *exponent,
        }
    }

    pub fn is_private(&self) -> bool {
        matches!(self, KeyMaterial::KeyPair { .. })
    }

    // Same modulus and exponent.
    pub fn same_group(&self, other: &KeyMaterial) -> bool {
        self.exponent() == other.exponent() && self.modulus() == other.modulus()
    }

    // Modulus length in bytes; every encoded element uses this width.
    pub fn byte_len(&self) -> usize {
        (self.modulus().bits() + 7) / 8
    }

    // Public function: x^e mod n.
    pub fn apply(&self, x: &BigUint) -> BigUint {
        x.modpow(&BigUint::from(self.exponent()), self.modulus())
    }

    // Private function: x^d mod n.
    pub fn invert(&self, x: &BigUint) -> Result<BigUint, ModValError> {
        match self {
            KeyMaterial::Public { .. } => Err(ModValError::PrivateKeyUnavailable),
            KeyMaterial::KeyPair { key, .. } => Ok(x.modpow(key.d(), self.modulus())),
        }
    }

    pub fn multiply(&self, x: &BigUint, y: &BigUint) -> BigUint {
        (x * y) % self.modulus()
    }

    pub fn inverse(&self, x: &BigUint) -> Option<BigUint> {
        let inv = x.clone().mod_inverse(self.modulus())?;
        ToBigUint::to_biguint(&inv)
    }

    // PKCS#1 DER RSAPrivateKey.
    pub fn private_key_der(&self) -> Result<Vec<u8>, ModValError> {
        match self {
            KeyMaterial::Public { .. } => Err(ModValError::PrivateKeyUnavailable),
            KeyMaterial::KeyPair { key, .. } => {
                let doc = key.to_pkcs1_der().map_err(|_| ModValError::EncodeError)?;
                Ok(doc.as_bytes().to_vec())
            }
        }
    }
}
