//! List-backed sequences.
//!
//! A [`ListSequence`] owns a snapshot of its elements, so nothing the caller
//! does to its own list after construction can change what the sequence
//! yields.

use crate::core::Sequence;

/// A sequence over an owned, ordered list of elements.
///
/// The cursor moves strictly forward from the first element to the last;
/// once it passes the end the sequence is exhausted for good.
#[derive(Debug, Clone)]
pub struct ListSequence<T> {
    items: Vec<T>,
    next: usize,
    current: Option<usize>,
}

impl<T> ListSequence<T> {
    /// Create a new list sequence that owns `items`
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            next: 0,
            current: None,
        }
    }

    /// Total number of elements in the snapshot
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the snapshot has no elements at all
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of elements not yet reached by the cursor
    pub fn remaining(&self) -> usize {
        self.items.len() - self.next
    }

    /// Consume the sequence and return the full snapshot
    pub fn into_inner(self) -> Vec<T> {
        self.items
    }
}

impl<T> Sequence for ListSequence<T> {
    type Item = T;

    fn advance(&mut self) -> bool {
        if self.next < self.items.len() {
            self.current = Some(self.next);
            self.next += 1;
            true
        } else {
            self.current = None;
            false
        }
    }

    fn current(&self) -> Option<&Self::Item> {
        self.current.map(|index| &self.items[index])
    }
}

impl<T> From<Vec<T>> for ListSequence<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T> FromIterator<T> for ListSequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Create a sequence over the elements of `list`, in order.
///
/// An owned `Vec` is moved in; a slice is cloned. Either way the sequence
/// owns its snapshot.
///
/// ```rust
/// use pullseq::prelude::*;
///
/// let original = vec![1, 2, 3];
/// let sequence = sequence_from_list(original.as_slice());
/// assert_eq!(collect(sequence), original);
/// ```
pub fn sequence_from_list<T, L>(list: L) -> ListSequence<T>
where
    L: Into<Vec<T>>,
{
    ListSequence::new(list.into())
}
