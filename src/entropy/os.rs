//! Operating-system entropy source.
//!
//! Reads from the platform CSPRNG (`getrandom` via `rand_core::OsRng`). Used to
//! seed a pool at start-up.

use rand_core::{OsRng, RngCore};

use super::{EntropyError, EntropySource};

/// Entropy source backed by the OS random number generator.
pub struct OsSource {
    _private: (),
}

impl OsSource {
    /// Creates a new OS source.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl Default for OsSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EntropySource for OsSource {
    fn name(&self) -> &'static str {
        "OsRng"
    }

    fn fill(&mut self, dest: &mut [u8]) -> Result<(), EntropyError> {
        OsRng.try_fill_bytes(dest).map_err(|_| EntropyError::SourceFailed)
    }

    fn entropy_estimate(&self) -> f64 {
        // Full entropy: the kernel pool is already conditioned.
        8.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::EntropyPool;

    #[test]
    fn test_os_source_fill() {
        let mut source = OsSource::new();
        let mut buf = [0u8; 32];
        assert!(source.fill(&mut buf).is_ok());
        assert!(buf.iter().any(|&x| x != 0), "OsSource produced all zeros");
    }

    #[test]
    fn test_os_source_readies_pool() {
        let mut pool = EntropyPool::new();
        pool.seed_from(&mut OsSource::new(), 20).unwrap();
        assert!(pool.ready());
    }
}
