//! Core traits for pull-based sequences.
//!
//! This module defines the cursor abstraction every other part of the crate
//! is built on. A sequence is advanced explicitly and then read, which lets
//! adapters stay lazy and lets generators apply backpressure: nothing is
//! produced until a consumer asks for it.

use crate::adapters::{Filter, Map};

/// A pull-based cursor over a stream of values.
///
/// The protocol is advance-then-read: call [`advance`](Sequence::advance) and,
/// if it returned `true`, the element is available through
/// [`current`](Sequence::current) until the next call to `advance`.
///
/// `current` returns `None` before the first successful advance and after
/// `advance` has returned `false`. Callers should treat that as misuse rather
/// than as a signal; the only end-of-sequence signal is `advance` returning
/// `false`.
///
/// Sequences are single-consumer. Wrapping a sequence in an adapter moves it
/// into the adapter, so the upstream cannot be read from afterwards.
///
/// # Examples
///
/// ```rust
/// use pullseq::core::Sequence;
///
/// struct Countdown {
///     next: u32,
///     current: Option<u32>,
/// }
///
/// impl Sequence for Countdown {
///     type Item = u32;
///
///     fn advance(&mut self) -> bool {
///         if self.next == 0 {
///             self.current = None;
///             return false;
///         }
///         self.current = Some(self.next);
///         self.next -= 1;
///         true
///     }
///
///     fn current(&self) -> Option<&Self::Item> {
///         self.current.as_ref()
///     }
/// }
///
/// let mut countdown = Countdown { next: 2, current: None };
/// assert!(countdown.advance());
/// assert_eq!(countdown.current(), Some(&2));
/// ```
pub trait Sequence {
    /// The type of elements this sequence yields
    type Item;

    /// Move the cursor to the next element.
    ///
    /// Returns `false` once the sequence is exhausted. Exhausted sequences stay
    /// exhausted.
    fn advance(&mut self) -> bool;

    /// The element under the cursor, if the last advance succeeded.
    fn current(&self) -> Option<&Self::Item>;
}

impl<S: Sequence + ?Sized> Sequence for Box<S> {
    type Item = S::Item;

    fn advance(&mut self) -> bool {
        (**self).advance()
    }

    fn current(&self) -> Option<&Self::Item> {
        (**self).current()
    }
}

impl<S: Sequence + ?Sized> Sequence for &mut S {
    type Item = S::Item;

    fn advance(&mut self) -> bool {
        (**self).advance()
    }

    fn current(&self) -> Option<&Self::Item> {
        (**self).current()
    }
}

/// Extension trait for sequences that provides adapter methods
pub trait SequenceExt: Sequence {
    /// Map elements through a function, lazily
    fn map<F, V>(self, f: F) -> Map<Self, F, V>
    where
        Self: Sized,
        F: Fn(&Self::Item) -> V,
    {
        Map::new(self, f)
    }

    /// Keep only the elements matching a predicate
    fn filter<F>(self, predicate: F) -> Filter<Self, F>
    where
        Self: Sized,
        F: FnMut(&Self::Item) -> bool,
    {
        Filter::new(self, predicate)
    }

    /// View this sequence as a std [`Iterator`] of cloned elements
    fn iter(self) -> SequenceIter<Self>
    where
        Self: Sized,
        Self::Item: Clone,
    {
        SequenceIter { sequence: self }
    }

    /// Box this sequence behind a trait object
    fn boxed<'a>(self) -> Box<dyn Sequence<Item = Self::Item> + 'a>
    where
        Self: Sized + 'a,
    {
        Box::new(self)
    }
}

impl<S: Sequence + ?Sized> SequenceExt for S {}

/// A std [`Iterator`] over a [`Sequence`].
///
/// Each call to `next` advances the sequence once and clones the element
/// under the cursor.
pub struct SequenceIter<S> {
    sequence: S,
}

impl<S> SequenceIter<S> {
    /// Recover the wrapped sequence
    pub fn into_inner(self) -> S {
        self.sequence
    }
}

impl<S> Iterator for SequenceIter<S>
where
    S: Sequence,
    S::Item: Clone,
{
    type Item = S::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.sequence.advance() {
            self.sequence.current().cloned()
        } else {
            None
        }
    }
}
