use crate::math::primes::{PrimalityMode, PrimeGenerator};
use crate::math::primitive_root::{PrimitiveRootFinder, RootSearchPolicy};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::ops::Range;

/// Configuration for one interception run.
#[derive(Debug, Clone)]
pub struct ExchangeConfig {
    /// Range the shared prime is drawn from.
    pub prime_range: Range<u64>,
    /// Range every private exponent is drawn from.
    pub exponent_range: Range<u64>,
    /// Use the cheaper, occasionally wrong, primality check.
    pub fast_primality: bool,
    /// Policy for primitive-root windows that come up empty.
    pub root_search: RootSearchPolicy,
    /// Optional RNG seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        ExchangeConfig {
            prime_range: 10_000..100_000,
            exponent_range: 10_000..100_000,
            fast_primality: false,
            root_search: RootSearchPolicy::FailFast,
            seed: None,
        }
    }
}

impl ExchangeConfig {
    /// A seeded ChaCha20 stream, or one from OS entropy when no seed is set.
    pub fn rng(&self) -> ChaCha20Rng {
        match self.seed {
            Some(s) => ChaCha20Rng::seed_from_u64(s),
            None => ChaCha20Rng::from_entropy(),
        }
    }

    pub fn prime_generator(&self) -> PrimeGenerator {
        PrimeGenerator::new(PrimalityMode::from_fast_flag(self.fast_primality))
    }

    pub fn root_finder(&self) -> PrimitiveRootFinder {
        PrimitiveRootFinder::new(self.root_search)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_defaults() {
        let config = ExchangeConfig::default();
        assert_eq!(config.prime_range, 10_000..100_000);
        assert_eq!(config.prime_generator().mode(), PrimalityMode::Exact);
        assert_eq!(config.root_finder().policy(), RootSearchPolicy::FailFast);
    }

    #[test]
    fn test_fast_flag_selects_mode() {
        let config = ExchangeConfig {
            fast_primality: true,
            ..Default::default()
        };
        assert_eq!(config.prime_generator().mode(), PrimalityMode::Fast);
    }

    #[test]
    fn test_seeded_rng_repeats() {
        let config = ExchangeConfig {
            seed: Some(17),
            ..Default::default()
        };
        let a: u64 = config.rng().gen();
        let b: u64 = config.rng().gen();
        assert_eq!(a, b);
    }
}
