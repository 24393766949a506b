//! Deterministic random numbers for scrambled perception.
//!
//! Hallucinated glyphs must be reproducible from a seed so that replays and
//! tests render identical frames. Callers derive a fresh seed per roll with
//! [`compute_seed`] and feed it to an [`RngOracle`].

/// Stateless random source: the same seed always yields the same value.
pub trait RngOracle: Send + Sync {
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform value in `0..bound`; returns 0 when `bound` is 0.
    fn below(&self, seed: u64, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.next_u32(seed) % bound
    }

    /// Uniform value in `[min, max]`.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        min + self.below(seed, max - min + 1)
    }
}

/// PCG-XSH-RR step: one LCG advance followed by the xorshift/rotate
/// output permutation.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::output(Self::step(seed))
    }
}

/// Mixes a base seed with a roll counter and a stream tag into one seed.
///
/// Distinct `stream` values keep independent consumers (monsters, objects,
/// traps) from sharing a sequence.
pub fn compute_seed(base: u64, counter: u64, stream: u32) -> u64 {
    let mut hash = base;
    hash ^= counter.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (stream as u64).wrapping_mul(0x517cc1b727220a95);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}
