//! The interceptor: an ordinary [`Endpoint`] paired with a brute-force discrete-log cracker.
//!
//! The cracker never looks inside another endpoint. It works from a [`PublicView`], i.e. only
//! the prime, root and public key that crossed the wire.

use super::endpoint::{Endpoint, PublicView};
use crate::error::{Error, Result};
use crate::math::modular::{mod_mul, mod_pow};
use log::{debug, info};

/// Exhaustive discrete-log search. Linear in the prime, so only viable for toy groups.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscreteLogCracker;

impl DiscreteLogCracker {
    /// The smallest `i` in `1 .. prime` with `root^i mod prime == observed`.
    ///
    /// Any such `i` reproduces every secret the real exponent would, even when it differs from
    /// the exponent the victim actually picked.
    ///
    /// # Errors
    /// [`Error::NotFound`] when no exponent matches, e.g. for an observed key of 0.
    pub fn recover_private_exponent(&self, prime: u64, root: u64, observed: u64) -> Result<u64> {
        let mut power = 1u64;
        for i in 1..prime {
            power = mod_mul(power, root, prime);
            if power == observed {
                info!("recovered exponent {} for public key {}", i, observed);
                return Ok(i);
            }
        }
        debug!("search over {} exponents found no match for {}", prime.saturating_sub(1), observed);
        Err(Error::NotFound {
            public_key: observed,
            prime,
        })
    }

    pub fn crack(&self, view: &PublicView) -> Result<u64> {
        self.recover_private_exponent(view.prime, view.root, view.public_key)
    }
}

/// A party that sits between two honest endpoints and answers both with its own key.
#[derive(Debug, Clone)]
pub struct Adversary {
    endpoint: Endpoint,
    cracker: DiscreteLogCracker,
}

impl Adversary {
    pub fn new(endpoint: Endpoint) -> Self {
        Adversary {
            endpoint,
            cracker: DiscreteLogCracker,
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn endpoint_mut(&mut self) -> &mut Endpoint {
        &mut self.endpoint
    }

    pub fn into_endpoint(self) -> Endpoint {
        self.endpoint
    }

    pub fn recover_private_exponent(&self, view: &PublicView) -> Result<u64> {
        self.cracker.crack(view)
    }

    /// The secret the endpoint behind `view` derives from `peer_public_key`, computed from a
    /// recovered exponent. With both honest views this yields their genuine session key.
    pub fn forge_shared_secret(&self, view: &PublicView, peer_public_key: u64) -> Result<u64> {
        if peer_public_key >= view.prime {
            return Err(Error::InvalidPublicKey {
                key: peer_public_key,
                prime: view.prime,
            });
        }
        let exponent = self.cracker.crack(view)?;
        Ok(mod_pow(peer_public_key, exponent, view.prime))
    }
}
