//! CBC mode with ciphertext stealing.
//!
//! Output length always equals input length. Messages must span at least one
//! block; the IV must be exactly one block.
//!
//! # Layout
//! For a message longer than one block, the last (possibly partial) plaintext
//! block is chained as usual, and the final two ciphertext blocks are emitted
//! swapped, with the second-to-last truncated to the length of the partial
//! block. A message of exactly two blocks is therefore plain CBC with the two
//! ciphertext blocks swapped.
//!
//! A single-block message is masked with the decryption of the IV:
//! `C = P ^ D_k(IV)`, and decrypts the same way.

#![forbid(unsafe_code)]

use super::desx::DesX;
use super::{BlockPrimitive, CipherError};
use crate::core::xor::xor_in_place;

/// CBC-CTS over DES-X with a 24-byte key.
pub type DesXCbc = CbcCts<DesX>;

pub struct CbcCts<C: BlockPrimitive> {
    cipher: C,
}

impl<C: BlockPrimitive> CbcCts<C> {
    pub fn new(cipher: C) -> Self {
        Self { cipher }
    }

    pub fn encrypt(&self, iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CipherError> {
        let (full, last) = split_last(iv, plaintext, C::BLOCK_LEN)?;
        let b = C::BLOCK_LEN;

        if full == 0 {
            return Ok(self.single_block(iv, plaintext));
        }

        let mut out = Vec::with_capacity(plaintext.len());
        let mut reg = iv.to_vec();
        for block in plaintext[..full].chunks(b) {
            xor_in_place(&mut reg, block);
            self.cipher.encrypt_block(&mut reg);
            out.extend_from_slice(&reg);
        }

        let penult = reg.clone();
        xor_in_place(&mut reg[..last], &plaintext[full..]);
        self.cipher.encrypt_block(&mut reg);

        out.truncate(full - b);
        out.extend_from_slice(&reg);
        out.extend_from_slice(&penult[..last]);
        Ok(out)
    }

    pub fn decrypt(&self, iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CipherError> {
        let (full, last) = split_last(iv, ciphertext, C::BLOCK_LEN)?;
        let b = C::BLOCK_LEN;

        if full == 0 {
            return Ok(self.single_block(iv, ciphertext));
        }

        let head = full - b;
        let mut out = Vec::with_capacity(ciphertext.len());
        let mut reg = iv.to_vec();
        for block in ciphertext[..head].chunks(b) {
            let mut d = block.to_vec();
            self.cipher.decrypt_block(&mut d);
            xor_in_place(&mut d, &reg);
            out.extend_from_slice(&d);
            reg.copy_from_slice(block);
        }

        let stolen = &ciphertext[full..];
        let mut d = ciphertext[head..full].to_vec();
        self.cipher.decrypt_block(&mut d);

        // d = (C[n-1] ^ P[n]) padded with the tail of C[n-1].
        let mut tail = d[..last].to_vec();
        xor_in_place(&mut tail, stolen);

        let mut prev = d;
        prev[..last].copy_from_slice(stolen);
        self.cipher.decrypt_block(&mut prev);
        xor_in_place(&mut prev, &reg);

        out.extend_from_slice(&prev);
        out.extend_from_slice(&tail);
        Ok(out)
    }

    // Exactly one block: input ^ D(IV) in both directions.
    fn single_block(&self, iv: &[u8], input: &[u8]) -> Vec<u8> {
        let mut mask = iv.to_vec();
        self.cipher.decrypt_block(&mut mask);
        xor_in_place(&mut mask, input);
        mask
    }
}

impl CbcCts<DesX> {
    /// DES-X keyed from `k1 || k || k3`.
    pub fn with_key(key: &[u8]) -> Result<Self, CipherError> {
        Ok(Self::new(DesX::new(key)?))
    }
}

// Returns (bytes before the final block, length of the final block).
fn split_last(iv: &[u8], data: &[u8], b: usize) -> Result<(usize, usize), CipherError> {
    if iv.len() != b {
        return Err(CipherError::InvalidIvLength);
    }
    if data.len() < b {
        return Err(CipherError::MessageTooShort);
    }
    let last = (data.len() - 1) % b + 1;
    Ok((data.len() - last, last))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: [u8; 24] = [
        0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0x13, 0x34, 0x57, 0x79, 0x9B, 0xBC, 0xDF, 0xF1,
        0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54, 0x32, 0x10,
    ];
    const IV: [u8; 8] = [0xA0, 0xA1, 0xA2, 0xA3, 0xA4, 0xA5, 0xA6, 0xA7];

    fn message(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i * 37 + 11) as u8).collect()
    }

    #[test]
    fn test_round_trip_preserves_length() {
        let cbc = DesXCbc::with_key(&KEY).unwrap();
        for len in 8..=40 {
            let pt = message(len);
            let ct = cbc.encrypt(&IV, &pt).unwrap();
            assert_eq!(ct.len(), len, "length {}", len);
            assert_ne!(ct, pt, "length {}", len);
            assert_eq!(cbc.decrypt(&IV, &ct).unwrap(), pt, "length {}", len);
        }
    }

    #[test]
    fn test_two_blocks_is_swapped_cbc() {
        let cbc = DesXCbc::with_key(&KEY).unwrap();
        let raw = DesX::new(&KEY).unwrap();
        let pt = message(16);

        let mut c1 = IV;
        xor_in_place(&mut c1, &pt[..8]);
        raw.encrypt_block(&mut c1);
        let mut c2 = c1;
        xor_in_place(&mut c2, &pt[8..]);
        raw.encrypt_block(&mut c2);

        let ct = cbc.encrypt(&IV, &pt).unwrap();
        assert_eq!(&ct[..8], &c2[..]);
        assert_eq!(&ct[8..], &c1[..]);
    }

    #[test]
    fn test_partial_last_block_layout() {
        let key = [0x01u8; 24];
        let iv = [0u8; 8];
        let cbc = DesXCbc::with_key(&key).unwrap();
        let raw = DesX::new(&key).unwrap();
        let pt = [b'A'; 10];

        let mut c1 = [b'A'; 8];
        raw.encrypt_block(&mut c1);
        let mut c2 = c1;
        xor_in_place(&mut c2[..2], &pt[8..]);
        raw.encrypt_block(&mut c2);

        let ct = cbc.encrypt(&iv, &pt).unwrap();
        assert_eq!(ct.len(), 10);
        assert_eq!(&ct[..8], &c2[..]);
        assert_eq!(&ct[8..], &c1[..2]);
        assert_eq!(cbc.decrypt(&iv, &ct).unwrap(), pt.to_vec());
    }

    #[test]
    fn test_single_block() {
        let cbc = DesXCbc::with_key(&KEY).unwrap();
        let raw = DesX::new(&KEY).unwrap();
        let pt = message(8);

        let mut mask = IV;
        raw.decrypt_block(&mut mask);
        let mut expected = pt.clone();
        xor_in_place(&mut expected, &mask);

        let ct = cbc.encrypt(&IV, &pt).unwrap();
        assert_eq!(ct, expected);
        assert_eq!(cbc.decrypt(&IV, &ct).unwrap(), pt);
    }

    #[test]
    fn test_leading_blocks_match_cbc() {
        let cbc = DesXCbc::with_key(&KEY).unwrap();
        let raw = DesX::new(&KEY).unwrap();
        let pt = message(29);
        let ct = cbc.encrypt(&IV, &pt).unwrap();

        let mut reg = IV;
        for (i, block) in pt[..16].chunks(8).enumerate() {
            xor_in_place(&mut reg, block);
            raw.encrypt_block(&mut reg);
            assert_eq!(&ct[i * 8..i * 8 + 8], &reg[..]);
        }
    }

    #[test]
    fn test_iv_and_key_affect_output() {
        let cbc = DesXCbc::with_key(&KEY).unwrap();
        let pt = message(21);
        let a = cbc.encrypt(&IV, &pt).unwrap();
        let b = cbc.encrypt(&[0u8; 8], &pt).unwrap();
        assert_ne!(a, b);

        let mut other_key = KEY;
        other_key[23] ^= 1;
        let c = DesXCbc::with_key(&other_key).unwrap().encrypt(&IV, &pt).unwrap();
        assert_ne!(a, c);
        assert_ne!(cbc.decrypt(&IV, &c).unwrap(), pt);
    }

    #[test]
    fn test_errors() {
        let cbc = DesXCbc::with_key(&KEY).unwrap();
        assert_eq!(cbc.encrypt(&IV, &message(7)), Err(CipherError::MessageTooShort));
        assert_eq!(cbc.decrypt(&IV, &[]), Err(CipherError::MessageTooShort));
        assert_eq!(cbc.encrypt(&IV[..7], &message(16)), Err(CipherError::InvalidIvLength));
        assert_eq!(cbc.decrypt(&[0u8; 9], &message(16)), Err(CipherError::InvalidIvLength));
        assert!(matches!(DesXCbc::with_key(&KEY[..16]), Err(CipherError::InvalidKeyLength)));
    }
}
