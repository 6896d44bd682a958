//! Length-preserving encryption under a single secret.
//!
//! # Scheme
//! 1. **Key**: BLAKE3_KDF(secret, context="blindcash 2026 sealed desx key"), 24 bytes
//! 2. **IV**: BLAKE3_KDF(secret, context="blindcash 2026 sealed desx iv"), 8 bytes
//! 3. **Cipher**: DES-X CBC with ciphertext stealing
//!
//! No authentication and no randomization: equal (secret, plaintext) pairs
//! give equal ciphertexts. Callers that reuse a secret must make plaintexts
//! unique themselves.

#![forbid(unsafe_code)]

use zeroize::Zeroizing;

use super::cts::DesXCbc;
use super::desx::{BLOCK_LEN, KEY_LEN};
use super::CipherError;

const KEY_CONTEXT: &str = "blindcash 2026 sealed desx key";
const IV_CONTEXT: &str = "blindcash 2026 sealed desx iv";

/// Encrypts `plaintext` (at least 8 bytes) under `secret`.
pub fn seal(secret: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CipherError> {
    let (cipher, iv) = derive(secret)?;
    cipher.encrypt(&iv[..], plaintext)
}

/// Inverse of [`seal`].
pub fn open(secret: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CipherError> {
    let (cipher, iv) = derive(secret)?;
    cipher.decrypt(&iv[..], ciphertext)
}

fn derive(secret: &[u8]) -> Result<(DesXCbc, Zeroizing<[u8; BLOCK_LEN]>), CipherError> {
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    derive_subkey(secret, KEY_CONTEXT, &mut key[..]);
    let mut iv = Zeroizing::new([0u8; BLOCK_LEN]);
    derive_subkey(secret, IV_CONTEXT, &mut iv[..]);
    Ok((DesXCbc::with_key(&key[..])?, iv))
}

fn derive_subkey(secret: &[u8], context: &str, out: &mut [u8]) {
    let mut hasher = blake3::Hasher::new_derive_key(context);
    hasher.update(secret);
    hasher.finalize_xof().fill(out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seal_open() {
        let secret = b"coin secret";
        let plaintext = b"serial=0042;value=5";
        let sealed = seal(secret, plaintext).unwrap();
        assert_eq!(sealed.len(), plaintext.len());
        assert_ne!(&sealed[..], &plaintext[..]);
        assert_eq!(open(secret, &sealed).unwrap(), plaintext.to_vec());
    }

    #[test]
    fn test_deterministic_per_secret() {
        let plaintext = b"exactly sixteen!";
        assert_eq!(seal(b"a", plaintext).unwrap(), seal(b"a", plaintext).unwrap());
        assert_ne!(seal(b"a", plaintext).unwrap(), seal(b"b", plaintext).unwrap());
        assert_ne!(open(b"b", &seal(b"a", plaintext).unwrap()).unwrap(), plaintext.to_vec());
    }

    #[test]
    fn test_short_message() {
        assert_eq!(seal(b"k", b"short"), Err(CipherError::MessageTooShort));
        assert_eq!(open(b"k", b""), Err(CipherError::MessageTooShort));
    }
}
