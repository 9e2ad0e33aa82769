//! Terminal operations that drain a sequence into a concrete result.
//!
//! Every function here takes the sequence by value. Most drain it completely;
//! [`index`] and [`contain`] stop at the first match, leaving whatever is
//! left unread, and [`selection::slice`] stops once it has enough elements.
//! Pass `&mut seq` if you need to keep the partially consumed sequence.

pub mod selection;

use std::collections::HashMap;
use std::hash::Hash;

use crate::core::Sequence;
use crate::scalar::Summable;

pub use selection::{choice, choice_with, shuffle, shuffle_with, slice};

/// Drain `sequence` into a vector, preserving order
pub fn collect<S>(mut sequence: S) -> Vec<S::Item>
where
    S: Sequence,
    S::Item: Clone,
{
    let mut items = Vec::new();
    while sequence.advance() {
        if let Some(item) = sequence.current() {
            items.push(item.clone());
        }
    }
    items
}

/// Left-fold `sequence` into an accumulator, starting from `init`
pub fn reduce<S, A, F>(mut sequence: S, mut f: F, init: A) -> A
where
    S: Sequence,
    F: FnMut(A, &S::Item) -> A,
{
    let mut acc = init;
    while sequence.advance() {
        if let Some(item) = sequence.current() {
            acc = f(acc, item);
        }
    }
    acc
}

/// The largest element of `sequence`.
///
/// Returns the zero value of `T` (its [`Default`]) when the sequence is
/// empty. When several elements tie, the first one wins.
pub fn max<S>(sequence: S) -> S::Item
where
    S: Sequence,
    S::Item: PartialOrd + Default + Clone,
{
    extremum(sequence, |best, candidate| best < candidate)
}

/// The smallest element of `sequence`.
///
/// Returns the zero value of `T` (its [`Default`]) when the sequence is
/// empty. When several elements tie, the first one wins.
pub fn min<S>(sequence: S) -> S::Item
where
    S: Sequence,
    S::Item: PartialOrd + Default + Clone,
{
    extremum(sequence, |best, candidate| best > candidate)
}

fn extremum<S, F>(mut sequence: S, replaces: F) -> S::Item
where
    S: Sequence,
    S::Item: Default + Clone,
    F: Fn(&S::Item, &S::Item) -> bool,
{
    if !sequence.advance() {
        return S::Item::default();
    }
    let mut best = match sequence.current() {
        Some(first) => first.clone(),
        None => return S::Item::default(),
    };

    while sequence.advance() {
        if let Some(candidate) = sequence.current() {
            if replaces(&best, candidate) {
                best = candidate.clone();
            }
        }
    }
    best
}

/// Sum every element, starting from the zero value.
///
/// An empty sequence sums to the zero value of `T`.
pub fn sum<S>(sequence: S) -> S::Item
where
    S: Sequence,
    S::Item: Summable,
{
    reduce(sequence, |acc: S::Item, value| acc.accumulate(value), S::Item::default())
}

/// Index every element by a derived key.
///
/// When two elements produce the same key the later one wins.
pub fn to_map<S, K, F>(mut sequence: S, mut key_fn: F) -> HashMap<K, S::Item>
where
    S: Sequence,
    S::Item: Clone,
    K: Eq + Hash,
    F: FnMut(&S::Item) -> K,
{
    let mut map = HashMap::new();
    while sequence.advance() {
        if let Some(item) = sequence.current() {
            map.insert(key_fn(item), item.clone());
        }
    }
    map
}

/// Group elements by a derived key.
///
/// Within each group elements keep the order they were seen in. The order of
/// the keys themselves is unspecified.
pub fn group_by<S, K, F>(mut sequence: S, mut key_fn: F) -> HashMap<K, Vec<S::Item>>
where
    S: Sequence,
    S::Item: Clone,
    K: Eq + Hash,
    F: FnMut(&S::Item) -> K,
{
    let mut groups: HashMap<K, Vec<S::Item>> = HashMap::new();
    while sequence.advance() {
        if let Some(item) = sequence.current() {
            groups.entry(key_fn(item)).or_default().push(item.clone());
        }
    }
    groups
}

/// Zero-based position of the first element equal to `value`.
///
/// Consumes the sequence up to and including the match. Returns `None` if no
/// element matches, in which case the sequence is fully drained.
pub fn index<S>(mut sequence: S, value: &S::Item) -> Option<usize>
where
    S: Sequence,
    S::Item: PartialEq,
{
    let mut position = 0;
    while sequence.advance() {
        if sequence.current() == Some(value) {
            return Some(position);
        }
        position += 1;
    }
    None
}

/// Check whether any element equals `value`. Consumes like [`index`].
pub fn contain<S>(sequence: S, value: &S::Item) -> bool
where
    S: Sequence,
    S::Item: PartialEq,
{
    index(sequence, value).is_some()
}
