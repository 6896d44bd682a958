#![forbid(unsafe_code)]

use zeroize::{Zeroize, Zeroizing};

use super::{EntropyError, EntropySource};
use super::rng::PoolRng;
use crate::core::xor::{invert_in_place, xor_in_place};

// EntropyPool accumulates caller-declared entropy and serves pseudo-random bytes.
// Contributions are hashed into `pending` and folded into `state` once at least
// CHUNK_BITS claimed bits have been pooled. Each mix derives fresh output from
// H(state) and replaces the state with H(!state).

/// Size of the secret state and of each output block.
pub const STATE_LEN: usize = 20;

/// Claimed bits that must be pooled before they touch the state.
pub const CHUNK_BITS: u64 = 80;

/// 160-bit truncation of BLAKE3.
fn digest160(data: &[u8]) -> [u8; STATE_LEN] {
    let mut out = [0u8; STATE_LEN];
    out.copy_from_slice(&blake3::hash(data).as_bytes()[..STATE_LEN]);
    out
}

pub struct EntropyPool {
    state: [u8; STATE_LEN],
    output: [u8; STATE_LEN],
    // None until the first mix.
    output_pos: Option<usize>,
    pending: blake3::Hasher,
    pooled_bits: u64,
}

impl EntropyPool {
    /// Creates an empty pool with all-zero state. Not ready until seeded.
    pub fn new() -> Self {
        Self {
            state: [0u8; STATE_LEN],
            output: [0u8; STATE_LEN],
            output_pos: None,
            pending: blake3::Hasher::new(),
            pooled_bits: 0,
        }
    }

    /// Adds `data` to the pool, crediting `entropy_bits` bits of entropy.
    ///
    /// Fails with `InvalidInput` if more bits are claimed than `data` holds.
    pub fn add(&mut self, data: &[u8], entropy_bits: u32) -> Result<(), EntropyError> {
        if u64::from(entropy_bits) > 8 * data.len() as u64 {
            return Err(EntropyError::InvalidInput);
        }
        self.pending.update(data);
        self.pooled_bits += u64::from(entropy_bits);
        if self.pooled_bits >= CHUNK_BITS {
            let mut scratch = Zeroizing::new([0u8; STATE_LEN]);
            scratch.copy_from_slice(&self.pending.finalize().as_bytes()[..STATE_LEN]);
            xor_in_place(&mut self.state, &scratch[..]);
            self.pending.reset();
            log::debug!("entropy pool: folded {} pooled bits into state", self.pooled_bits);
            self.pooled_bits = 0;
            self.mix();
        }
        Ok(())
    }

    /// Returns true iff a one-byte `get` would succeed.
    pub fn ready(&self) -> bool {
        self.output_pos.is_some()
    }

    /// Returns `amount` pseudo-random bytes.
    pub fn get(&mut self, amount: usize) -> Result<Vec<u8>, EntropyError> {
        let mut out = vec![0u8; amount];
        self.fill(&mut out)?;
        Ok(out)
    }

    /// Fills `dest` with pseudo-random bytes.
    pub fn fill(&mut self, dest: &mut [u8]) -> Result<(), EntropyError> {
        let mut pos = self.output_pos.ok_or(EntropyError::NotReady)?;
        for byte in dest.iter_mut() {
            *byte = self.output[pos];
            pos += 1;
            if pos == STATE_LEN {
                self.mix();
                pos = 0;
            }
        }
        self.output_pos = Some(pos);
        Ok(())
    }

    /// Draws `bytes` bytes from `source` and adds them, crediting the source's
    /// per-byte estimate (rounded down, capped at 8 bits per byte).
    pub fn seed_from<S: EntropySource + ?Sized>(
        &mut self,
        source: &mut S,
        bytes: usize,
    ) -> Result<(), EntropyError> {
        let mut buf = Zeroizing::new(vec![0u8; bytes]);
        source.fill(&mut buf).map_err(|e| {
            log::warn!("entropy source {} failed: {}", source.name(), e);
            EntropyError::SourceFailed
        })?;
        let estimate = source.entropy_estimate().clamp(0.0, 8.0);
        let claimed = ((estimate * bytes as f64) as u64).min(8 * bytes as u64);
        let claimed = u32::try_from(claimed).map_err(|_| EntropyError::InvalidInput)?;
        log::debug!("seeding entropy pool from {} ({} bits claimed)", source.name(), claimed);
        self.add(&buf, claimed)
    }

    /// Borrows the pool as a `rand_core` generator. Fails with `NotReady` until
    /// the first chunk has been folded in.
    pub fn rng(&mut self) -> Result<PoolRng<'_>, EntropyError> {
        if !self.ready() {
            return Err(EntropyError::NotReady);
        }
        Ok(PoolRng::new(self))
    }

    // output = H(state); state = H(!state)
    fn mix(&mut self) {
        self.output = digest160(&self.state);
        self.output_pos = Some(0);
        invert_in_place(&mut self.state);
        self.state = digest160(&self.state);
    }
}

impl Default for EntropyPool {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for EntropyPool {
    fn drop(&mut self) {
        self.state.zeroize();
        self.output.zeroize();
        self.pending.reset();
    }
}
