//! Terminals that select or rearrange elements: slicing, shuffling and
//! random choice.
//!
//! Each of these materializes (part of) the input and, where the result is
//! itself a sequence, hands back a fresh [`ListSequence`].

use crate::core::{Error, Result, Sequence};
use crate::random::RandomIndex;
use crate::sources::ListSequence;
use crate::terminals::collect;

/// The elements at positions `start..end`.
///
/// The first `start` elements are skipped by advancing past them without
/// reading. If the sequence runs out before `end`, whatever was available is
/// returned; `end <= start` yields an empty sequence.
pub fn slice<S>(mut sequence: S, start: usize, end: usize) -> ListSequence<S::Item>
where
    S: Sequence,
    S::Item: Clone,
{
    for _ in 0..start {
        if !sequence.advance() {
            return ListSequence::new(Vec::new());
        }
    }

    let wanted = end.saturating_sub(start);
    let mut items = Vec::with_capacity(wanted);
    while items.len() < wanted && sequence.advance() {
        if let Some(item) = sequence.current() {
            items.push(item.clone());
        }
    }
    ListSequence::new(items)
}

/// A uniformly random permutation of `sequence`, using the thread-local RNG
pub fn shuffle<S>(sequence: S) -> ListSequence<S::Item>
where
    S: Sequence,
    S::Item: Clone,
{
    shuffle_with(sequence, &mut rand::thread_rng())
}

/// A uniformly random permutation of `sequence` drawn from `rng`.
///
/// Uses the Fisher–Yates algorithm: every permutation is equally likely as
/// long as `rng` is uniform.
pub fn shuffle_with<S, R>(sequence: S, rng: &mut R) -> ListSequence<S::Item>
where
    S: Sequence,
    S::Item: Clone,
    R: RandomIndex + ?Sized,
{
    let mut items = collect(sequence);
    for i in (1..items.len()).rev() {
        let j = rng.random_index(i + 1);
        items.swap(i, j);
    }
    ListSequence::new(items)
}

/// One uniformly chosen element of `sequence`, using the thread-local RNG.
///
/// Fails with [`Error::Empty`] if the sequence has no elements.
pub fn choice<S>(sequence: S) -> Result<S::Item>
where
    S: Sequence,
    S::Item: Clone,
{
    choice_with(sequence, &mut rand::thread_rng())
}

/// One uniformly chosen element of `sequence`, drawn from `rng`.
///
/// Fails with [`Error::Empty`] if the sequence has no elements.
pub fn choice_with<S, R>(sequence: S, rng: &mut R) -> Result<S::Item>
where
    S: Sequence,
    S::Item: Clone,
    R: RandomIndex + ?Sized,
{
    let mut items = collect(sequence);
    if items.is_empty() {
        return Err(Error::empty("choose"));
    }
    let i = rng.random_index(items.len());
    Ok(items.swap_remove(i))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::sequence_from_list;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;
    use tokio_test::{assert_err, assert_ok};

    #[test]
    fn test_slice_within_bounds() {
        let sliced = slice(sequence_from_list(vec![0, 1, 2, 3, 4, 5]), 2, 4);

        assert_eq!(sliced.into_inner(), vec![2, 3]);
    }

    #[test]
    fn test_slice_past_the_end_returns_what_is_available() {
        let sliced = slice(sequence_from_list(vec![0, 1, 2, 3, 4, 5]), 2, 100);

        assert_eq!(sliced.into_inner(), vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_slice_degenerate_ranges() {
        assert!(slice(sequence_from_list(vec![1, 2, 3]), 10, 20).is_empty());
        assert!(slice(sequence_from_list(vec![1, 2, 3]), 2, 1).is_empty());
        assert!(slice(sequence_from_list(vec![1, 2, 3]), 1, 1).is_empty());
    }

    #[test]
    fn test_slice_stops_reading_at_end() {
        let mut sequence = sequence_from_list(vec!['a', 'b', 'c', 'd']);
        let sliced = slice(&mut sequence, 1, 2);

        assert_eq!(sliced.into_inner(), vec!['b']);
        assert_eq!(sequence.remaining(), 2);
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let input: Vec<u32> = (0..100).collect();
        let mut shuffled = shuffle(sequence_from_list(input.clone())).into_inner();

        shuffled.sort_unstable();
        assert_eq!(shuffled, input);
    }

    #[test]
    fn test_shuffle_with_seed_is_reproducible() {
        let first = shuffle_with(
            sequence_from_list(vec![1, 2, 3, 4, 5, 6, 7, 8]),
            &mut StdRng::seed_from_u64(42),
        );
        let second = shuffle_with(
            sequence_from_list(vec![1, 2, 3, 4, 5, 6, 7, 8]),
            &mut StdRng::seed_from_u64(42),
        );

        assert_eq!(first.into_inner(), second.into_inner());
    }

    #[test]
    fn test_shuffle_is_uniform() {
        let mut rng = StdRng::seed_from_u64(2024);
        let trials = 60_000;
        let mut counts: HashMap<Vec<u8>, usize> = HashMap::new();

        for _ in 0..trials {
            let permutation = shuffle_with(sequence_from_list(vec![1u8, 2, 3]), &mut rng);
            *counts.entry(permutation.into_inner()).or_default() += 1;
        }

        // 6 permutations, 10_000 expected each, stddev is about 91
        assert_eq!(counts.len(), 6);
        for (permutation, count) in counts {
            assert!(
                (9_400..=10_600).contains(&count),
                "{:?} seen {} times",
                permutation,
                count
            );
        }
    }

    #[test]
    fn test_shuffle_empty_and_single() {
        assert!(shuffle(sequence_from_list(Vec::<i8>::new())).is_empty());
        assert_eq!(shuffle(sequence_from_list(vec![9])).into_inner(), vec![9]);
    }

    #[test]
    fn test_choice_returns_a_member() {
        let options = vec!["red", "green", "blue"];
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..50 {
            let picked = assert_ok!(choice_with(sequence_from_list(options.clone()), &mut rng));
            assert!(options.contains(&picked));
        }
    }

    #[test]
    fn test_choice_on_empty_is_an_error() {
        let err = assert_err!(choice(sequence_from_list(Vec::<u64>::new())));

        assert!(matches!(err, Error::Empty { operation: "choose" }));
    }
}
