//! Uniform random index source used by shuffling and choosing.

use rand::Rng;

/// A source of uniformly distributed indices.
///
/// Every [`rand::Rng`] is one, so callers can pass a seeded generator to
/// get reproducible shuffles.
pub trait RandomIndex {
    /// A uniformly chosen index in `0..n`. `n` must be non-zero.
    fn random_index(&mut self, n: usize) -> usize;
}

impl<R: Rng + ?Sized> RandomIndex for R {
    fn random_index(&mut self, n: usize) -> usize {
        self.gen_range(0..n)
    }
}
