//! Generators: sequences produced by a background task.
//!
//! Each generator spawns a tokio task that pushes values into a channel with
//! room for exactly one element, so the producer never runs more than one
//! value ahead of its consumer. Every send races against a cancellation
//! token; cancelling unblocks a waiting producer and makes its task exit.
//!
//! ```rust
//! use pullseq::prelude::*;
//!
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! let (sequence, cancel) = Generator::new()
//!     .handle(runtime.handle().clone())
//!     .count(10u32, 5)
//!     .unwrap();
//!
//! let first: Vec<u32> = sequence.iter().take(3).collect();
//! cancel.cancel();
//! assert_eq!(first, vec![10, 15, 20]);
//! ```

pub mod channel;

use std::future::Future;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::core::{Error, Result, Sequence};
use crate::scalar::Number;
use crate::terminals::collect;

pub use channel::{Cancel, ChannelSequence};

/// Number of values a producer may have in flight
pub const CHANNEL_CAPACITY: usize = 1;

/// A running generator: its sequence and the capability to cancel it
pub type Generated<T> = (ChannelSequence<T>, Cancel);

/// Configuration shared by the generators a [`Generator`] starts
#[derive(Clone, Debug, Default)]
pub struct GeneratorConfig {
    /// Runtime to spawn producers on; the ambient runtime if `None`
    pub handle: Option<Handle>,
    /// Token whose cancellation also cancels every generator started
    pub parent_token: Option<CancellationToken>,
    /// Name used in logs and metrics; the generator kind if `None`
    pub label: Option<String>,
}

/// Builder for starting generators with a shared configuration.
///
/// The free functions [`count`], [`cycle`] and [`repeat`] use the default
/// configuration, which spawns on the ambient tokio runtime.
#[derive(Clone, Debug, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    /// Create a generator builder with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a generator builder from an existing configuration
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Spawn producers on `handle`.
    ///
    /// A current-thread runtime only runs producers while something drives
    /// it. A blocking [`Sequence::advance`] on another thread does not, so it
    /// waits until the runtime is driven or the generator is cancelled.
    pub fn handle(mut self, handle: Handle) -> Self {
        self.config.handle = Some(handle);
        self
    }

    /// Derive each generator's token from `token`
    pub fn parent_token(mut self, token: CancellationToken) -> Self {
        self.config.parent_token = Some(token);
        self
    }

    /// Set the label used in logs and metrics
    pub fn label<S: Into<String>>(mut self, label: S) -> Self {
        self.config.label = Some(label.into());
        self
    }

    /// The current configuration
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// `start`, `start + step`, `start + 2·step`, … without end.
    ///
    /// For integer types the sequence ends instead of overflowing.
    pub fn count<T: Number>(&self, start: T, step: T) -> Result<Generated<T>> {
        self.spawn("count", move |publisher| async move {
            let mut next = Some(start);
            while let Some(value) = next {
                if let Err(stop) = publisher.publish(value).await {
                    return stop;
                }
                next = value.checked_step(step);
            }
            Exit::Overflow
        })
    }

    /// The elements of `sequence`, over and over.
    ///
    /// `sequence` is drained on the calling thread before the producer
    /// starts. An empty `sequence` yields an empty generator.
    pub fn cycle<S>(&self, sequence: S) -> Result<Generated<S::Item>>
    where
        S: Sequence,
        S::Item: Clone + Send + Sync + 'static,
    {
        let handle = self.runtime("cycle")?;
        let items = collect(sequence);
        self.spawn_on(handle, "cycle", move |publisher| async move {
            if items.is_empty() {
                return Exit::Completed;
            }
            loop {
                for item in &items {
                    if let Err(stop) = publisher.publish(item.clone()).await {
                        return stop;
                    }
                }
            }
        })
    }

    /// `value`, `times` times; forever when `times` is `-1`.
    ///
    /// Any other negative `times` yields nothing.
    pub fn repeat<T>(&self, value: T, times: i64) -> Result<Generated<T>>
    where
        T: Clone + Send + Sync + 'static,
    {
        let limit = match times {
            -1 => None,
            n => Some(u64::try_from(n).unwrap_or(0)),
        };

        self.spawn("repeat", move |publisher| async move {
            match limit {
                None => loop {
                    if let Err(stop) = publisher.publish(value.clone()).await {
                        return stop;
                    }
                },
                Some(limit) => {
                    for _ in 0..limit {
                        if let Err(stop) = publisher.publish(value.clone()).await {
                            return stop;
                        }
                    }
                    Exit::Completed
                }
            }
        })
    }

    fn runtime(&self, kind: &'static str) -> Result<Handle> {
        match &self.config.handle {
            Some(handle) => Ok(handle.clone()),
            None => Handle::try_current().map_err(|_| Error::NoRuntime { generator: kind }),
        }
    }

    fn spawn<T, F, Fut>(&self, kind: &'static str, produce: F) -> Result<Generated<T>>
    where
        T: Send + 'static,
        F: FnOnce(Publisher<T>) -> Fut,
        Fut: Future<Output = Exit> + Send + 'static,
    {
        let handle = self.runtime(kind)?;
        self.spawn_on(handle, kind, produce)
    }

    fn spawn_on<T, F, Fut>(
        &self,
        handle: Handle,
        kind: &'static str,
        produce: F,
    ) -> Result<Generated<T>>
    where
        T: Send + 'static,
        F: FnOnce(Publisher<T>) -> Fut,
        Fut: Future<Output = Exit> + Send + 'static,
    {
        let token = match &self.config.parent_token {
            Some(parent) => parent.child_token(),
            None => CancellationToken::new(),
        };
        let label = self.config.label.clone().unwrap_or_else(|| kind.to_string());

        let (sender, receiver) = mpsc::channel(CHANNEL_CAPACITY);
        let producer = produce(Publisher {
            sender,
            token: token.clone(),
            label: label.clone(),
        });

        #[cfg_attr(not(any(feature = "tracing", feature = "metrics")), allow(unused_variables))]
        let task_label = label.clone();
        let task = handle.spawn(async move {
            log_debug!(generator = %task_label, "producer started");
            #[cfg(feature = "metrics")]
            crate::metrics::record_started(&task_label);

            #[cfg_attr(not(any(feature = "tracing", feature = "metrics")), allow(unused_variables))]
            let exit = producer.await;

            log_debug!(generator = %task_label, reason = exit.as_str(), "producer stopped");
            #[cfg(feature = "metrics")]
            crate::metrics::record_stopped(&task_label, exit.as_str());
        });

        Ok((
            ChannelSequence::new(receiver, token.clone()),
            Cancel::new(token, task, label),
        ))
    }
}

/// Why a producer task stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exit {
    /// Every value was delivered
    Completed,
    /// The cancellation token fired
    Cancelled,
    /// The consumer dropped its sequence
    Closed,
    /// The next counter value does not fit the type
    Overflow,
}

impl Exit {
    #[cfg_attr(not(any(feature = "tracing", feature = "metrics")), allow(dead_code))]
    fn as_str(self) -> &'static str {
        match self {
            Exit::Completed => "completed",
            Exit::Cancelled => "cancelled",
            Exit::Closed => "closed",
            Exit::Overflow => "overflow",
        }
    }
}

/// The producer side of a generator channel
struct Publisher<T> {
    sender: mpsc::Sender<T>,
    token: CancellationToken,
    #[cfg_attr(not(any(feature = "tracing", feature = "metrics")), allow(dead_code))]
    label: String,
}

impl<T> Publisher<T> {
    /// Send one value, waiting for the slot to free up or for cancellation.
    async fn publish(&self, value: T) -> std::result::Result<(), Exit> {
        let sent = tokio::select! {
            biased;
            _ = self.token.cancelled() => return Err(Exit::Cancelled),
            sent = self.sender.send(value) => sent,
        };

        match sent {
            Ok(()) => {
                log_trace!(generator = %self.label, "value sent");
                #[cfg(feature = "metrics")]
                crate::metrics::record_sent(&self.label);
                Ok(())
            }
            Err(_) => Err(Exit::Closed),
        }
    }
}

/// Start [`Generator::count`] with the default configuration
pub fn count<T: Number>(start: T, step: T) -> Result<Generated<T>> {
    Generator::new().count(start, step)
}

/// Start [`Generator::cycle`] with the default configuration
pub fn cycle<S>(sequence: S) -> Result<Generated<S::Item>>
where
    S: Sequence,
    S::Item: Clone + Send + Sync + 'static,
{
    Generator::new().cycle(sequence)
}

/// Start [`Generator::repeat`] with the default configuration
pub fn repeat<T>(value: T, times: i64) -> Result<Generated<T>>
where
    T: Clone + Send + Sync + 'static,
{
    Generator::new().repeat(value, times)
}
