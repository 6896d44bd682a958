//! Client-side blinding for Chaumian blind signatures.
//!
//! The client hides a coin `m` as `m * r^e` before sending it to the signer.
//! The signer returns `(m * r^e)^d = m^d * r`, and dividing by `r` leaves the
//! plain signature `m^d`. The signer never sees `m` or `m^d`.

#![forbid(unsafe_code)]

use super::value::ModularValue;
use super::ModValError;
use crate::entropy::EntropyPool;

/// A blinding factor `r` bound to one signer's public group.
#[derive(Debug, Clone)]
pub struct Blinder {
    factor: ModularValue,
}

impl Blinder {
    /// Draws a fresh invertible blinding factor for `group` from `pool`.
    ///
    /// Only the public part of `group` is kept.
    pub fn new(group: &ModularValue, pool: &mut EntropyPool) -> Result<Self, ModValError> {
        let mut factor = group.to_public();
        loop {
            factor.randomize(pool)?;
            if factor.is_invertible() {
                return Ok(Self { factor });
            }
            log::debug!("blinding factor not invertible, drawing again");
        }
    }

    /// Uses an existing element as the blinding factor.
    pub fn with_factor(factor: &ModularValue) -> Result<Self, ModValError> {
        if !factor.is_invertible() {
            return Err(ModValError::NotInvertible);
        }
        Ok(Self { factor: factor.to_public() })
    }

    pub fn factor(&self) -> &ModularValue {
        &self.factor
    }

    /// `coin * r^e`, ready to be sent to the signer.
    pub fn blind(&self, coin: &ModularValue) -> Result<ModularValue, ModValError> {
        let mut mask = self.factor.clone();
        mask.encrypt();
        let mut blinded = coin.to_public();
        blinded.multiply(&mask)?;
        Ok(blinded)
    }

    /// `signed / r`: strips the factor from the signer's reply.
    pub fn unblind(&self, signed: &ModularValue) -> Result<ModularValue, ModValError> {
        let mut plain = signed.to_public();
        plain.divide(&self.factor)?;
        Ok(plain)
    }
}
