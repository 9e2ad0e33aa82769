//! # Lazy pull-based sequences for Rust
//!
//! This crate provides a cursor-style sequence abstraction with lazy adapters,
//! terminal operations that drain sequences into concrete results, and
//! generators whose elements come from cancellable background tasks.
//!
//! ## Core Concepts
//!
//! - **Sequence**: A cursor advanced explicitly and then read
//! - **Adapter**: A sequence lazily derived from another (`map`, `filter`)
//! - **Terminal**: A function that drains a sequence (`collect`, `reduce`, `group_by`, ...)
//! - **Generator**: A sequence fed by a tokio task over a single-slot channel
//!
//! ## Example
//!
//! ```rust
//! use pullseq::prelude::*;
//!
//! let words = sequence_from_list(vec!["a", "bb", "cc", "d"]);
//! let long = words.filter(|w| w.len() > 1).map(|w| w.to_uppercase());
//!
//! assert_eq!(collect(long), vec!["BB", "CC"]);
//! ```

#[macro_use]
mod tracing_support;

pub mod adapters;
pub mod core;
pub mod generators;
pub mod random;
pub mod scalar;
pub mod sources;
pub mod terminals;

// Re-export commonly used items
pub mod prelude {
    pub use crate::adapters::{filter, map, Filter, Map};
    pub use crate::core::{Error, Result, Sequence, SequenceExt, SequenceIter};
    pub use crate::generators::{
        count, cycle, repeat, Cancel, ChannelSequence, Generated, Generator, GeneratorConfig,
    };
    pub use crate::random::RandomIndex;
    pub use crate::scalar::{is_zero, zero, Number, Summable};
    pub use crate::sources::{sequence_from_list, ListSequence};
    pub use crate::terminals::{
        choice, choice_with, collect, contain, group_by, index, max, min, reduce, shuffle,
        shuffle_with, slice, sum, to_map,
    };
}

// Re-export main error type
pub use crate::core::{Error, Result};

// Feature flags for optional dependencies
#[cfg(feature = "metrics")]
pub mod metrics;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
