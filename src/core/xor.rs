#![forbid(unsafe_code)]
// Word-at-a-time XOR helpers.
// - Processes 8-byte words followed by a byte tail.
// - No secret-dependent branching; length agreement is enforced by callers.
// - Used by the entropy pool (state folding, bit flipping) and by CBC chaining.

/// XORs `mask` into `target` in place.
/// Requires: `mask.len() >= target.len()`.
#[inline(always)]
pub fn xor_in_place(target: &mut [u8], mask: &[u8]) {
    let len = target.len();
    let mut i = 0;

    while i + 8 <= len {
        let mut a = [0u8; 8];
        let mut b = [0u8; 8];
        a.copy_from_slice(&target[i..i + 8]);
        b.copy_from_slice(&mask[i..i + 8]);
        let x = u64::from_ne_bytes(a) ^ u64::from_ne_bytes(b);
        target[i..i + 8].copy_from_slice(&x.to_ne_bytes());
        i += 8;
    }

    while i < len {
        target[i] ^= mask[i];
        i += 1;
    }
}

/// Flips every bit of `target`.
#[inline(always)]
pub fn invert_in_place(target: &mut [u8]) {
    for b in target.iter_mut() {
        *b ^= 0xFF;
    }
}
