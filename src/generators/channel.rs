//! The consumer side of a generator: a sequence reading from a single-slot
//! channel, and the handle that cancels its producer.

use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::executor;
use futures_core::Stream;
use tokio::sync::mpsc;
use tokio::task::{self, JoinHandle};
use tokio_util::sync::CancellationToken;

use crate::core::{Error, Result, Sequence};

/// A sequence fed by a background producer over a capacity-one channel.
///
/// Values arrive in exactly the order they were produced. The producer can
/// only run one value ahead of the consumer; it waits on its send until the
/// slot is read or it is cancelled.
///
/// Once the generator is cancelled, [`advance`](Sequence::advance) returns
/// `false` without delivering anything else, even a value that was already
/// sitting in the slot. Dropping the sequence also stops the producer: its
/// next send fails and the task exits.
///
/// The synchronous [`Sequence`] implementation parks the calling thread
/// until a value arrives or the generator is cancelled. It works from plain
/// threads and from tasks on a multi-thread runtime, where the wait goes
/// through [`tokio::task::block_in_place`]. On a current-thread runtime it
/// panics, since parking the only worker would starve the producer; use
/// [`advance_async`](ChannelSequence::advance_async) or the [`Stream`]
/// implementation there instead.
///
/// Because the type is both a [`Sequence`] and a [`Stream`], `.map` and
/// `.filter` are ambiguous when `futures::StreamExt` is in scope. Use the
/// free functions in that case:
///
/// ```rust
/// use pullseq::prelude::*;
///
/// let runtime = tokio::runtime::Runtime::new().unwrap();
/// let _guard = runtime.enter();
///
/// let (numbers, cancel) = count(1u64, 1).unwrap();
/// let odd_squares = map(filter(numbers, |n| n % 2 == 1), |n| n * n);
///
/// assert_eq!(collect(slice(odd_squares, 0, 3)), vec![1, 9, 25]);
/// cancel.cancel();
/// ```
pub struct ChannelSequence<T> {
    receiver: mpsc::Receiver<T>,
    token: CancellationToken,
    current: Option<T>,
}

impl<T> ChannelSequence<T> {
    pub(crate) fn new(receiver: mpsc::Receiver<T>, token: CancellationToken) -> Self {
        Self {
            receiver,
            token,
            current: None,
        }
    }

    /// Advance without blocking the thread.
    ///
    /// Same contract as [`Sequence::advance`]; the new element is readable
    /// through [`Sequence::current`].
    pub async fn advance_async(&mut self) -> bool {
        if self.token.is_cancelled() {
            self.current = None;
            return false;
        }

        let received = receive(&mut self.receiver, &self.token).await;
        self.current = self.accept(received);
        self.current.is_some()
    }

    /// Check whether the generator behind this sequence has been cancelled
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    fn accept(&self, received: Option<T>) -> Option<T> {
        if self.token.is_cancelled() {
            None
        } else {
            received
        }
    }
}

impl<T> Sequence for ChannelSequence<T> {
    type Item = T;

    fn advance(&mut self) -> bool {
        if self.token.is_cancelled() {
            self.current = None;
            return false;
        }

        let receiver = &mut self.receiver;
        let token = &self.token;
        // On a multi-thread worker this hands the worker's other tasks off
        // before parking; anywhere outside a runtime it just runs the wait.
        let received = task::block_in_place(|| executor::block_on(receive(receiver, token)));
        self.current = self.accept(received);
        self.current.is_some()
    }

    fn current(&self) -> Option<&Self::Item> {
        self.current.as_ref()
    }
}

/// Wait for the next value, or for cancellation, whichever comes first
async fn receive<T>(receiver: &mut mpsc::Receiver<T>, token: &CancellationToken) -> Option<T> {
    tokio::select! {
        biased;
        _ = token.cancelled() => None,
        item = receiver.recv() => item,
    }
}

impl<T> std::fmt::Debug for ChannelSequence<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelSequence")
            .field("cancelled", &self.token.is_cancelled())
            .field("has_current", &self.current.is_some())
            .finish()
    }
}

// No field is structurally pinned.
impl<T> Unpin for ChannelSequence<T> {}

impl<T> Stream for ChannelSequence<T> {
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        this.current = None;

        if this.token.is_cancelled() {
            return Poll::Ready(None);
        }

        match this.receiver.poll_recv(cx) {
            Poll::Ready(received) => Poll::Ready(this.accept(received)),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// The cancellation capability of a generator.
///
/// [`cancel`](Cancel::cancel) can be called any number of times; only the
/// first call has an effect. After it, the producer stops at its next send
/// attempt, including one it is currently blocked on.
pub struct Cancel {
    token: CancellationToken,
    task: JoinHandle<()>,
    label: String,
}

impl Cancel {
    pub(crate) fn new(token: CancellationToken, task: JoinHandle<()>, label: String) -> Self {
        Self { token, task, label }
    }

    /// Ask the producer to stop
    pub fn cancel(&self) {
        if !self.token.is_cancelled() {
            log_debug!(generator = %self.label, "cancelling producer");
        }
        self.token.cancel();
    }

    /// Check whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Check whether the producer task has exited
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// The label this generator logs and reports metrics under
    pub fn label(&self) -> &str {
        &self.label
    }

    /// A clone of the underlying token, for wiring into other tasks
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Wait for the producer task to exit.
    ///
    /// An infinite generator only exits once cancelled or once its sequence
    /// is dropped, so call [`cancel`](Cancel::cancel) first.
    pub async fn join(self) -> Result<()> {
        self.task.await?;
        Ok(())
    }

    /// Like [`join`](Cancel::join), but give up after `duration`
    pub async fn join_timeout(self, duration: Duration) -> Result<()> {
        match tokio::time::timeout(duration, self.task).await {
            Ok(joined) => {
                joined?;
                Ok(())
            }
            Err(_) => Err(Error::timeout(duration.as_millis() as u64)),
        }
    }
}

impl std::fmt::Debug for Cancel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cancel")
            .field("label", &self.label)
            .field("cancelled", &self.token.is_cancelled())
            .field("finished", &self.task.is_finished())
            .finish()
    }
}
