//! Low-level byte primitives shared by the pool and the chaining mode.

pub mod xor;
