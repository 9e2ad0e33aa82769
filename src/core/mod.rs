//! Core traits and types for the pullseq library.
//!
//! This module contains the fundamental trait and error types that define
//! the pull-based sequence model.

pub mod error;
pub mod traits;

// Re-export core items
pub use error::{Error, Result};
pub use traits::{Sequence, SequenceExt, SequenceIter};
