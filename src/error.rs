use thiserror::Error;

/// Failures surfaced by parameter generation, key derivation and cracking.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// No prime candidate survived the primality check in `[lower, upper)`.
    #[error("no prime found in range [{lower}, {upper})")]
    EmptyRange { lower: u64, upper: u64 },

    /// Every sampled search window came up without a primitive root.
    #[error("no primitive root found for prime {prime} after {attempts} window(s)")]
    NoRootFound { prime: u64, attempts: usize },

    /// An operation was requested before its prerequisites were in place.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// Exhaustive discrete-log search found no matching exponent.
    #[error("no exponent maps to public key {public_key} modulo {prime}")]
    NotFound { public_key: u64, prime: u64 },

    /// Private exponents were requested from an empty range.
    #[error("no private exponent available in range [{lower}, {upper})")]
    EmptyExponentRange { lower: u64, upper: u64 },

    /// A peer public key outside `[0, prime)`.
    #[error("public key {key} is not a residue modulo {prime}")]
    InvalidPublicKey { key: u64, prime: u64 },
}

pub type Result<T> = std::result::Result<T, Error>;
