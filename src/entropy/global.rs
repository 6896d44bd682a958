//! Process-wide entropy pool.
//!
//! A single [`EntropyPool`] guarded by one mutex. Every `add`, `get` and the
//! mixes they trigger run under the lock, so output position and state always
//! advance together.

use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use super::os::OsSource;
use super::{EntropyError, EntropyPool};

static POOL: OnceLock<Mutex<EntropyPool>> = OnceLock::new();

/// Locks the process-wide pool.
///
/// Pool operations never leave the state half-written, so a poisoned lock is
/// recovered rather than propagated.
pub fn lock() -> MutexGuard<'static, EntropyPool> {
    POOL.get_or_init(|| Mutex::new(EntropyPool::new()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Adds entropy to the process-wide pool.
pub fn add(data: &[u8], entropy_bits: u32) -> Result<(), EntropyError> {
    lock().add(data, entropy_bits)
}

/// Draws bytes from the process-wide pool.
pub fn get(amount: usize) -> Result<Vec<u8>, EntropyError> {
    lock().get(amount)
}

/// Returns true iff the process-wide pool can serve output.
pub fn ready() -> bool {
    lock().ready()
}

/// Seeds the process-wide pool with `bytes` bytes from the OS generator.
pub fn seed_from_os(bytes: usize) -> Result<(), EntropyError> {
    lock().seed_from(&mut OsSource::new(), bytes)
}
