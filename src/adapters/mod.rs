//! Lazy adapters over sequences.
//!
//! Adapters take ownership of an upstream sequence and transform it without
//! evaluating anything ahead of the consumer. They compose freely:
//! `filter(map(s, f), p)` filters mapped values, while `map(filter(s, p), f)`
//! maps only the elements that passed.

use std::cell::OnceCell;

use crate::core::Sequence;

/// A sequence that maps each upstream element through a function.
///
/// Advancing delegates one-to-one to the upstream. The mapping function runs
/// on the first [`current`](Sequence::current) read after an advance and the
/// result is cached until the next advance, so it is evaluated at most once
/// per element and not at all for elements nobody reads.
pub struct Map<S, F, V> {
    source: S,
    f: F,
    mapped: OnceCell<V>,
}

impl<S, F, V> Map<S, F, V> {
    /// Create a new map adapter over `source`
    pub fn new(source: S, f: F) -> Self {
        Self {
            source,
            f,
            mapped: OnceCell::new(),
        }
    }

    /// Recover the upstream sequence
    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S, F, V> Sequence for Map<S, F, V>
where
    S: Sequence,
    F: Fn(&S::Item) -> V,
{
    type Item = V;

    fn advance(&mut self) -> bool {
        self.mapped.take();
        self.source.advance()
    }

    fn current(&self) -> Option<&Self::Item> {
        let item = self.source.current()?;
        Some(self.mapped.get_or_init(|| (self.f)(item)))
    }
}

/// A sequence that only yields upstream elements matching a predicate.
///
/// Each upstream element is tested exactly once, inside
/// [`advance`](Sequence::advance), which may pull several upstream elements
/// before finding a match.
pub struct Filter<S, F> {
    source: S,
    predicate: F,
}

impl<S, F> Filter<S, F> {
    /// Create a new filter adapter over `source`
    pub fn new(source: S, predicate: F) -> Self {
        Self { source, predicate }
    }

    /// Recover the upstream sequence
    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S, F> Sequence for Filter<S, F>
where
    S: Sequence,
    F: FnMut(&S::Item) -> bool,
{
    type Item = S::Item;

    fn advance(&mut self) -> bool {
        while self.source.advance() {
            match self.source.current() {
                Some(item) if (self.predicate)(item) => return true,
                Some(_) => {}
                None => return false,
            }
        }
        false
    }

    fn current(&self) -> Option<&Self::Item> {
        self.source.current()
    }
}

/// Lazily map every element of `source` through `f`
pub fn map<S, F, V>(source: S, f: F) -> Map<S, F, V>
where
    S: Sequence,
    F: Fn(&S::Item) -> V,
{
    Map::new(source, f)
}

/// Lazily keep the elements of `source` for which `predicate` holds
pub fn filter<S, F>(source: S, predicate: F) -> Filter<S, F>
where
    S: Sequence,
    F: FnMut(&S::Item) -> bool,
{
    Filter::new(source, predicate)
}
