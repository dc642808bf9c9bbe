//! Event publication abstractions (mechanics only).
//!
//! Services only need the narrow [`EventSink`] contract: hand over an event
//! and move on. Delivery is fire-and-forget; a publish failure is reported to
//! the caller, who decides whether it matters (domain services log and
//! continue). [`EventBus`] adds fan-out subscriptions for in-process
//! consumers such as tests.

use std::sync::Arc;
use std::sync::mpsc::Receiver;

/// A subscription to an event stream.
///
/// Each subscription gets a copy of every message published after it was
/// created (broadcast semantics). Intended for single-threaded consumption.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Drain everything currently queued without blocking.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

/// Narrow publish contract injected into services.
///
/// The trait requires `Send + Sync`: services are shared across request
/// threads and may publish concurrently.
pub trait EventSink<M>: Send + Sync {
    type Error: core::fmt::Debug + core::fmt::Display + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;
}

/// Event sink with in-process broadcast subscriptions.
pub trait EventBus<M>: EventSink<M> {
    fn subscribe(&self) -> Subscription<M>;
}

impl<M, S> EventSink<M> for Arc<S>
where
    S: EventSink<M> + ?Sized,
{
    type Error = S::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}
