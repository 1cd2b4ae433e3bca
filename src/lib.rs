//! DISCLAIMER: a **toy** Diffie-Hellman exchange with a man-in-the-middle, for demonstration
//! and teaching only. Primes are small enough to brute-force on purpose. Do not use any of this
//! to protect real data.

pub mod config;
pub mod error;
pub mod exchange;
pub mod math;
pub mod random;
pub mod scenario;

pub use config::ExchangeConfig;
pub use error::{Error, Result};
pub use exchange::{Adversary, DiscreteLogCracker, Endpoint, GroupParams, PublicView};
pub use math::{PrimalityMode, PrimeGenerator, PrimitiveRootFinder, RootSearchPolicy};
pub use random::RandomSource;
pub use scenario::{intercept, run, InterceptionReport};
