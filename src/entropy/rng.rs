//! `rand_core` adapter over a ready [`EntropyPool`].
//!
//! RSA key generation consumes randomness through `RngCore`; this adapter lets
//! it draw directly from the pool. It can only be obtained from
//! [`EntropyPool::rng`], which refuses to hand it out before the pool is ready.
//! Readiness never reverts, so every draw through the adapter succeeds.

use rand_core::{impls, CryptoRng, RngCore};

use super::EntropyPool;

/// Generator borrowing a ready pool.
pub struct PoolRng<'a> {
    pool: &'a mut EntropyPool,
}

impl<'a> PoolRng<'a> {
    pub(super) fn new(pool: &'a mut EntropyPool) -> Self {
        Self { pool }
    }
}

impl RngCore for PoolRng<'_> {
    fn next_u32(&mut self) -> u32 {
        impls::next_u32_via_fill(self)
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_fill(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        if let Err(e) = self.pool.fill(dest) {
            // Only reachable if the pool lost readiness, which it cannot.
            panic!("entropy pool became unavailable: {}", e);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.pool.fill(dest).map_err(rand_core::Error::new)
    }
}

impl CryptoRng for PoolRng<'_> {}
