//! The randomness capability threaded through parameter and key generation.
//!
//! Nothing in this crate reaches for a global generator. Every function that needs
//! randomness takes a `&mut impl RandomSource`, and every `rand::Rng` already is one,
//! so seeded generators (`StdRng::seed_from_u64`, `ChaCha20Rng`) make runs reproducible.

use rand::seq::SliceRandom;
use rand::Rng;
use std::ops::Range;

/// Source of the uniform draws the exchange needs.
pub trait RandomSource {
    /// A uniform integer in `range`. The range must be non-empty.
    fn uniform_in(&mut self, range: Range<u64>) -> u64;

    /// A uniform pick among `candidates`, or `None` when there are none.
    fn pick(&mut self, candidates: &[u64]) -> Option<u64>;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn uniform_in(&mut self, range: Range<u64>) -> u64 {
        self.gen_range(range)
    }

    fn pick(&mut self, candidates: &[u64]) -> Option<u64> {
        candidates.choose(self).copied()
    }
}

/// Replays fixed draws so tests can steer window and candidate selection.
#[cfg(test)]
pub(crate) struct Scripted {
    uniforms: std::collections::VecDeque<u64>,
}

#[cfg(test)]
impl Scripted {
    pub(crate) fn new(uniforms: &[u64]) -> Self {
        Scripted {
            uniforms: uniforms.iter().copied().collect(),
        }
    }
}

#[cfg(test)]
impl RandomSource for Scripted {
    fn uniform_in(&mut self, range: Range<u64>) -> u64 {
        let next = self.uniforms.pop_front().expect("script exhausted");
        assert!(range.contains(&next), "{next} not in {range:?}");
        next
    }

    // Always the smallest candidate.
    fn pick(&mut self, candidates: &[u64]) -> Option<u64> {
        candidates.first().copied()
    }
}
