//! The full interception run: two honest endpoints, one adversary in the middle.
//!
//! 1. Pick a prime and a primitive root, then give all three parties random exponents.
//! 2. Bob and Alice exchange their genuine keys.
//! 3. Mallory answers each of them with her own key, opening one session per victim.
//! 4. Mallory brute-forces both private exponents from the public views alone and rebuilds
//!    the genuine Bob/Alice session key.
//!
//! Each connection step is recorded as a snapshot of the endpoints involved so the
//! [`InterceptionReport`] can print the whole narrative afterwards.

use crate::config::ExchangeConfig;
use crate::error::Result;
use crate::exchange::{Adversary, Endpoint, GroupParams};
use crate::random::RandomSource;
use log::info;
use std::fmt;

/// Endpoint snapshots taken right after one pairwise key agreement.
#[derive(Debug, Clone)]
pub struct Stage {
    /// Heading such as `Bob/Alice connection`.
    pub title: String,
    /// The two endpoints as they stood after agreeing.
    pub endpoints: Vec<Endpoint>,
}

impl Stage {
    fn connection(first: &Endpoint, second: &Endpoint) -> Self {
        Stage {
            title: format!("{}/{} connection", first.name(), second.name()),
            endpoints: vec![first.clone(), second.clone()],
        }
    }
}

/// An exponent the adversary recovered for a named victim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrackedKey {
    /// Label of the victim endpoint.
    pub name: String,
    /// Smallest exponent reproducing the victim's public key.
    pub exponent: u64,
}

#[derive(Debug, Clone)]
pub struct InterceptionReport {
    /// The group shared by all three parties.
    pub params: GroupParams,
    /// Label of the interceptor.
    pub adversary: String,
    /// One snapshot per pairwise agreement, in order.
    pub stages: Vec<Stage>,
    /// Exponents recovered for each honest endpoint.
    pub cracked: Vec<CrackedKey>,
    /// The session key the honest pair agreed on directly.
    pub genuine_secret: u64,
    /// The same key, rebuilt by the adversary from a cracked exponent.
    pub forged_secret: u64,
}

/// Draws fresh parameters and parties from `config`, then runs [`intercept`].
pub fn run<R: RandomSource + ?Sized>(config: &ExchangeConfig, rng: &mut R) -> Result<InterceptionReport> {
    let prime = config
        .prime_generator()
        .generate(config.prime_range.clone(), rng)?;
    let root = config.root_finder().find(prime, rng)?;
    let params = GroupParams::new(prime, root);

    let bob = Endpoint::random("Bob", params, config.exponent_range.clone(), rng)?;
    let alice = Endpoint::random("Alice", params, config.exponent_range.clone(), rng)?;
    let mallory = Endpoint::random("Mallory", params, config.exponent_range.clone(), rng)?;

    intercept(bob, alice, Adversary::new(mallory))
}

/// Runs the exchange and the attack over parties that already share a group.
pub fn intercept(
    mut first: Endpoint,
    mut second: Endpoint,
    mut adversary: Adversary,
) -> Result<InterceptionReport> {
    let first_pub = first.generate_public_key()?;
    let second_pub = second.generate_public_key()?;
    let adversary_pub = adversary.endpoint_mut().generate_public_key()?;
    let mut stages = Vec::with_capacity(3);

    let genuine_secret = first.derive_shared_secret(second_pub)?;
    second.derive_shared_secret(first_pub)?;
    stages.push(Stage::connection(&first, &second));

    first.derive_shared_secret(adversary_pub)?;
    adversary.endpoint_mut().derive_shared_secret(first_pub)?;
    stages.push(Stage::connection(&first, adversary.endpoint()));

    second.derive_shared_secret(adversary_pub)?;
    adversary.endpoint_mut().derive_shared_secret(second_pub)?;
    stages.push(Stage::connection(&second, adversary.endpoint()));

    let first_view = first.public_view()?;
    let second_view = second.public_view()?;
    let cracked = [&first_view, &second_view]
        .into_iter()
        .map(|view| {
            adversary.recover_private_exponent(view).map(|exponent| CrackedKey {
                name: view.name.clone(),
                exponent,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    let forged_secret = adversary.forge_shared_secret(&first_view, second_pub)?;
    info!(
        "{} rebuilt the {}/{} session key",
        adversary.endpoint().name(),
        first.name(),
        second.name()
    );

    Ok(InterceptionReport {
        params: GroupParams::new(first_view.prime, first_view.root),
        adversary: adversary.endpoint().name().to_string(),
        stages,
        cracked,
        genuine_secret,
        forged_secret,
    })
}

impl fmt::Display for InterceptionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stage in &self.stages {
            writeln!(f, "====={}=====", stage.title)?;
            for endpoint in &stage.endpoints {
                writeln!(f, "{}", endpoint)?;
            }
        }
        writeln!(f, "====={} cracking private keys=====", self.adversary)?;
        for key in &self.cracked {
            writeln!(f, "Potential private key for {}: {}", key.name, key.exponent)?;
        }
        writeln!(f, "Recovered session key: {}", self.forged_secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::math::RootSearchPolicy;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    const GROUP: GroupParams = GroupParams { prime: 23, root: 5 };

    fn toy_report() -> InterceptionReport {
        intercept(
            Endpoint::with_params("A", 6, GROUP),
            Endpoint::with_params("B", 15, GROUP),
            Adversary::new(Endpoint::with_params("Mallory", 13, GROUP)),
        )
        .unwrap()
    }

    #[test]
    fn test_toy_interception() {
        let report = toy_report();
        assert_eq!(report.params, GROUP);
        assert_eq!(report.genuine_secret, 2);
        assert_eq!(report.forged_secret, 2);
        assert_eq!(
            report.cracked,
            vec![
                CrackedKey { name: "A".into(), exponent: 6 },
                CrackedKey { name: "B".into(), exponent: 15 },
            ]
        );

        let titles: Vec<_> = report.stages.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["A/B connection", "A/Mallory connection", "B/Mallory connection"]);

        let secrets = |stage: &Stage| -> Vec<Option<u64>> {
            stage.endpoints.iter().map(Endpoint::shared_secret).collect()
        };
        assert_eq!(secrets(&report.stages[0]), [Some(2), Some(2)]);
        assert_eq!(secrets(&report.stages[1]), [Some(18), Some(18)]);
        assert_eq!(secrets(&report.stages[2]), [Some(7), Some(7)]);
    }

    #[test]
    fn test_report_narrative() {
        let text = toy_report().to_string();
        assert!(text.starts_with("=====A/B connection=====\nEndpoint name: A\n"));
        assert!(text.contains("=====Mallory cracking private keys=====\n"));
        assert!(text.contains("Potential private key for A: 6\n"));
        assert!(text.contains("Potential private key for B: 15\n"));
        assert!(text.ends_with("Recovered session key: 2\n"));
    }

    #[test]
    fn test_missing_params_propagates() {
        let result = intercept(
            Endpoint::new("A", 6),
            Endpoint::with_params("B", 15, GROUP),
            Adversary::new(Endpoint::with_params("Mallory", 13, GROUP)),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_exponent_range_fails_run() {
        let config = ExchangeConfig {
            prime_range: 1_000..3_000,
            exponent_range: 500..500,
            fast_primality: false,
            root_search: RootSearchPolicy::Retry { max_windows: 64 },
            seed: None,
        };
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        assert_eq!(
            run(&config, &mut rng).unwrap_err(),
            Error::EmptyExponentRange { lower: 500, upper: 500 }
        );
    }

    #[test]
    fn test_seeded_run_end_to_end() {
        let config = ExchangeConfig {
            prime_range: 1_000..5_000,
            exponent_range: 100..1_000,
            fast_primality: false,
            root_search: RootSearchPolicy::Retry { max_windows: 64 },
            seed: None,
        };
        let mut rng = ChaCha20Rng::seed_from_u64(2024);
        let report = run(&config, &mut rng).unwrap();

        assert!(config.prime_range.contains(&report.params.prime));
        assert!(crate::math::is_primitive_root(report.params.root, report.params.prime));
        assert_eq!(report.forged_secret, report.genuine_secret);
        assert_eq!(report.cracked.len(), 2);
        for (key, stage_endpoint) in report.cracked.iter().zip(&report.stages[0].endpoints) {
            assert_eq!(key.name, stage_endpoint.name());
            // Exponents above p - 1 come back reduced modulo the group order.
            let order = report.params.prime - 1;
            assert_eq!(key.exponent % order, stage_endpoint.private_exponent() % order);
        }
    }

    #[test]
    fn test_run_is_reproducible() {
        let config = ExchangeConfig {
            prime_range: 1_000..3_000,
            exponent_range: 100..1_000,
            fast_primality: false,
            root_search: RootSearchPolicy::Retry { max_windows: 64 },
            seed: Some(9),
        };
        let a = run(&config, &mut config.rng()).unwrap();
        let b = run(&config, &mut config.rng()).unwrap();
        assert_eq!(a.to_string(), b.to_string());
    }
}
