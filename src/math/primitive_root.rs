//! Primitive-root discovery for a small prime `p`.
//!
//! A candidate `r` is a primitive root when its powers `r^1 .. r^(p-1)` hit every residue in
//! `1 .. p` exactly once. Checking one candidate costs `O(p)`, so instead of scanning the whole
//! group the finder samples an upper bound `U` in `[20, p)` and only examines the
//! [`SEARCH_WINDOW`] integers directly below it. Any root found in that window is returned, picked
//! uniformly.
//!
//! Some windows contain no primitive root at all (for `p = 79` the window below `U = 28` is
//! empty). What happens then is decided by the finder's [`RootSearchPolicy`].

use crate::error::{Error, Result};
use crate::math::modular::mod_mul;
use crate::random::RandomSource;
use bitvec::prelude::*;
use log::{debug, info, warn};

/// Width of a search window, and the smallest upper bound that may be sampled.
pub const SEARCH_WINDOW: u64 = 20;

/// What to do when a sampled window holds no primitive root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RootSearchPolicy {
    /// Report [`Error::NoRootFound`] after the first empty window.
    #[default]
    FailFast,
    /// Draw fresh windows, at most `max_windows` in total, before giving up.
    Retry { max_windows: usize },
}

impl RootSearchPolicy {
    fn windows(&self) -> usize {
        match *self {
            RootSearchPolicy::FailFast => 1,
            RootSearchPolicy::Retry { max_windows } => max_windows.max(1),
        }
    }
}

/// True when the powers of `candidate` modulo `prime` cover `1 .. prime` without repeating.
pub fn is_primitive_root(candidate: u64, prime: u64) -> bool {
    if prime < 2 || candidate == 0 || candidate >= prime {
        return false;
    }

    let mut seen = bitvec![0; prime as usize];
    let mut power = 1u64;
    for _ in 1..prime {
        power = mod_mul(power, candidate, prime);
        if power == 0 || seen[power as usize] {
            return false;
        }
        seen.set(power as usize, true);
    }
    true
}

/// Finds generators of the multiplicative group modulo a prime.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrimitiveRootFinder {
    policy: RootSearchPolicy,
}

impl PrimitiveRootFinder {
    pub fn new(policy: RootSearchPolicy) -> Self {
        PrimitiveRootFinder { policy }
    }

    pub fn policy(&self) -> RootSearchPolicy {
        self.policy
    }

    /// Primitive roots among the [`SEARCH_WINDOW`] integers below `upper_bound`, ascending.
    /// Zero and anything at or above `prime` are never candidates.
    pub fn search_window(&self, prime: u64, upper_bound: u64) -> Vec<u64> {
        let start = upper_bound.saturating_sub(SEARCH_WINDOW).max(1);
        let end = upper_bound.min(prime);
        (start..end).filter(|&r| is_primitive_root(r, prime)).collect()
    }

    /// A primitive root of `prime`, drawn from randomly placed windows.
    ///
    /// # Errors
    /// [`Error::NoRootFound`] when `prime` is too small to place a window, or when every window
    /// allowed by the policy came up empty.
    pub fn find<R: RandomSource + ?Sized>(&self, prime: u64, rng: &mut R) -> Result<u64> {
        if prime <= SEARCH_WINDOW {
            return Err(Error::NoRootFound { prime, attempts: 0 });
        }

        let windows = self.policy.windows();
        for attempt in 1..=windows {
            let upper_bound = rng.uniform_in(SEARCH_WINDOW..prime);
            let roots = self.search_window(prime, upper_bound);
            debug!(
                "window below {} holds {} primitive roots of {}",
                upper_bound,
                roots.len(),
                prime
            );

            if let Some(root) = rng.pick(&roots) {
                info!("selected primitive root {} for prime {}", root, prime);
                return Ok(root);
            }
            if attempt < windows {
                warn!(
                    "no primitive root below {}, drawing window {}/{}",
                    upper_bound,
                    attempt + 1,
                    windows
                );
            }
        }

        Err(Error::NoRootFound {
            prime,
            attempts: windows,
        })
    }
}
