//! Cryptographic core for a Chaumian blind-signature e-cash scheme.
//!
//! - [`entropy`]: an entropy pool that only yields bytes once seeded.
//! - [`modval`]: RSA group elements with blinding, signing and unblinding.
//! - [`cipher`]: length-preserving DES-X CBC with ciphertext stealing.
//! - [`config`]: parameters chosen once by the host application.

#![forbid(unsafe_code)]

pub mod core;
pub mod entropy;
pub mod modval;
pub mod cipher;
pub mod config;

pub use cipher::{CipherError, DesXCbc};
pub use config::CryptoConfig;
pub use entropy::{EntropyError, EntropyPool};
pub use modval::{Blinder, ModValError, ModularValue};
