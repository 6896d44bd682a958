//! Entropy pooling and pseudo-random output.
//!
//! This module turns irregular, caller-supplied entropy into a stream of
//! pseudo-random bytes. Contributions are hashed into a pending digest and only
//! folded into the secret state once enough claimed entropy has accumulated.
//!
//! # Design
//! - **Chunked**: Entropy is folded in 80-bit chunks so an observer who knows the
//!   state cannot follow it by brute-forcing small additions.
//! - **One-way ratchet**: Output and next state are hashes of different pre-images.
//! - **Explicit handle**: `EntropyPool` is a plain value; `global` wraps one
//!   process-wide instance behind a lock.

pub mod pool;
pub mod rng;
pub mod os;
pub mod global;

use core::fmt;

pub use pool::EntropyPool;
pub use rng::PoolRng;

/// Error types for entropy collection and output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntropyError {
    /// Claimed entropy exceeds the bits actually supplied.
    InvalidInput,
    /// No chunk of entropy has been folded into the pool yet.
    NotReady,
    /// An entropy source failed to deliver bytes.
    SourceFailed,
}

impl fmt::Display for EntropyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntropyError::InvalidInput => write!(f, "claimed entropy exceeds the supplied bits"),
            EntropyError::NotReady => write!(f, "not enough entropy has been collected"),
            EntropyError::SourceFailed => write!(f, "entropy source failed"),
        }
    }
}

impl std::error::Error for EntropyError {}

/// A trait for entropy sources that can seed a pool.
pub trait EntropySource {
    /// Returns a unique identifier for the source.
    fn name(&self) -> &'static str;

    /// Fills `dest` with bytes from the source.
    fn fill(&mut self, dest: &mut [u8]) -> Result<(), EntropyError>;

    /// Returns the estimated entropy per byte (in bits, 0.0-8.0).
    ///
    /// The pool credits `floor(estimate * len)` bits per contribution, so this
    /// must be conservative.
    fn entropy_estimate(&self) -> f64;
}
