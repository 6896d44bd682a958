#![forbid(unsafe_code)]

use des::cipher::generic_array::GenericArray;
use des::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use des::Des;
use zeroize::Zeroize;

use super::{BlockPrimitive, CipherError};
use crate::core::xor::xor_in_place;

// DES-X: E(x) = DES_k(x ^ k1) ^ k3.
// Key layout is k1 || k || k3, eight bytes each.

pub const KEY_LEN: usize = 24;
pub const BLOCK_LEN: usize = 8;

pub struct DesX {
    pre: [u8; BLOCK_LEN],
    des: Des,
    post: [u8; BLOCK_LEN],
}

impl DesX {
    pub fn new(key: &[u8]) -> Result<Self, CipherError> {
        if key.len() != KEY_LEN {
            return Err(CipherError::InvalidKeyLength);
        }
        let des = Des::new_from_slice(&key[8..16]).map_err(|_| CipherError::InvalidKeyLength)?;
        let mut pre = [0u8; BLOCK_LEN];
        let mut post = [0u8; BLOCK_LEN];
        pre.copy_from_slice(&key[..8]);
        post.copy_from_slice(&key[16..]);
        Ok(Self { pre, des, post })
    }
}

impl BlockPrimitive for DesX {
    const BLOCK_LEN: usize = BLOCK_LEN;

    fn encrypt_block(&self, block: &mut [u8]) {
        xor_in_place(block, &self.pre);
        self.des.encrypt_block(GenericArray::from_mut_slice(block));
        xor_in_place(block, &self.post);
    }

    fn decrypt_block(&self, block: &mut [u8]) {
        xor_in_place(block, &self.post);
        self.des.decrypt_block(GenericArray::from_mut_slice(block));
        xor_in_place(block, &self.pre);
    }
}

impl Drop for DesX {
    fn drop(&mut self) {
        self.pre.zeroize();
        self.post.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(pre: [u8; 8], des: [u8; 8], post: [u8; 8]) -> Vec<u8> {
        [pre, des, post].concat()
    }

    #[test]
    fn test_zero_whitening_is_plain_des() {
        let k = hex::decode("133457799BBCDFF1").unwrap();
        let mut des_key = [0u8; 8];
        des_key.copy_from_slice(&k);
        let cipher = DesX::new(&key([0; 8], des_key, [0; 8])).unwrap();

        let mut block = hex::decode("0123456789ABCDEF").unwrap();
        cipher.encrypt_block(&mut block);
        assert_eq!(hex::encode_upper(&block), "85E813540F0AB405");
        cipher.decrypt_block(&mut block);
        assert_eq!(hex::encode_upper(&block), "0123456789ABCDEF");
    }

    #[test]
    fn test_whitening_applied_on_both_sides() {
        let des_key = [0x13, 0x34, 0x57, 0x79, 0x9B, 0xBC, 0xDF, 0xF1];
        let pre = [0x0F; 8];
        let post = [0xA5; 8];
        let plain_des = DesX::new(&key([0; 8], des_key, [0; 8])).unwrap();
        let whitened = DesX::new(&key(pre, des_key, post)).unwrap();

        let plaintext = [0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF];

        let mut expected = plaintext;
        xor_in_place(&mut expected, &pre);
        plain_des.encrypt_block(&mut expected);
        xor_in_place(&mut expected, &post);

        let mut block = plaintext;
        whitened.encrypt_block(&mut block);
        assert_eq!(block, expected);
        whitened.decrypt_block(&mut block);
        assert_eq!(block, plaintext);
    }

    #[test]
    fn test_key_length() {
        assert!(matches!(DesX::new(&[0u8; 23]), Err(CipherError::InvalidKeyLength)));
        assert!(matches!(DesX::new(&[0u8; 25]), Err(CipherError::InvalidKeyLength)));
        assert!(matches!(DesX::new(&[0u8; 8]), Err(CipherError::InvalidKeyLength)));
        assert!(DesX::new(&[0u8; 24]).is_ok());
    }
}
