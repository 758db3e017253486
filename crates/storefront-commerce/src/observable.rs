//! Last-value broadcast for engine state.

use tokio::sync::watch;

/// Holds the latest published value and hands out subscriptions to it.
///
/// A new subscriber sees the current value immediately through
/// [`watch::Receiver::borrow`]; async consumers wait on
/// [`watch::Receiver::changed`] for the next publish. Publishing is
/// synchronous and never fails, with or without subscribers.
#[derive(Debug)]
pub struct Observable<T> {
    tx: watch::Sender<T>,
}

impl<T> Observable<T> {
    /// Start with `initial` as the current value.
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Replace the current value and wake every subscriber.
    pub fn publish(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// Subscribe to this value and every later one.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}
