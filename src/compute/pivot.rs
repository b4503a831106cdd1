//! Pivot index providers for the partitioner.
//!
//! The partitioner asks for exactly one index per call. Production code uses
//! [`RandomPivot`], which is what keeps selection expected-linear on
//! adversarial orderings. Tests and benchmarks can plug in a seeded generator
//! or a [`FixedPivot`] to make every run reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of pivot indices.
pub trait PivotSource {
    /// Returns an index in `lo..=hi`.
    fn pick(&mut self, lo: usize, hi: usize) -> usize;
}

impl<P: PivotSource + ?Sized> PivotSource for &mut P {
    fn pick(&mut self, lo: usize, hi: usize) -> usize {
        (**self).pick(lo, hi)
    }
}

/// Uniform random pivots drawn from any `rand` generator.
///
/// # Examples
///
/// ```
/// use nearfind::compute::pivot::{PivotSource, RandomPivot};
///
/// let mut pivots = RandomPivot::seeded(7);
/// let idx = pivots.pick(3, 9);
/// assert!((3..=9).contains(&idx));
/// ```
#[derive(Debug, Clone)]
pub struct RandomPivot<R = StdRng> {
    rng: R,
}

impl<R: Rng> RandomPivot<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl RandomPivot<StdRng> {
    /// Reproducible stream from a 64-bit seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Stream seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> PivotSource for RandomPivot<R> {
    fn pick(&mut self, lo: usize, hi: usize) -> usize {
        self.rng.random_range(lo..=hi)
    }
}

/// Deterministic pivot rules.
///
/// `Last` is textbook Lomuto and degrades to quadratic time on sorted input;
/// it exists for tests and for measuring what the random pivot buys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FixedPivot {
    First,
    #[default]
    Last,
    Middle,
}

impl PivotSource for FixedPivot {
    fn pick(&mut self, lo: usize, hi: usize) -> usize {
        match self {
            FixedPivot::First => lo,
            FixedPivot::Last => hi,
            FixedPivot::Middle => lo + (hi - lo) / 2,
        }
    }
}
