// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Runtime-agnostic cancellation signal.
//!
//! The aggregator listens to a [`CancellationToken`] alongside its input
//! stream and idle timer. Cancelling any clone of a token flushes the batch in
//! progress and closes the output stream. A token that is never cancelled is
//! the default "signal that never fires".

use core::future::Future;
use core::pin::Pin;
use core::sync::atomic::{AtomicBool, Ordering};
use core::task::{Context, Poll};
use event_listener::{Event, EventListener};
use std::sync::Arc;

/// Cloneable handle to a shared cancellation flag.
///
/// All clones observe the same state. Once cancelled a token stays cancelled.
///
/// # Example
///
/// ```
/// use batchan_core::CancellationToken;
///
/// # async fn example() {
/// let token = CancellationToken::new();
/// let watcher = token.clone();
///
/// tokio::spawn(async move {
///     watcher.cancelled().await;
///     println!("shutting down");
/// });
///
/// token.cancel();
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct CancellationToken {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    cancelled: AtomicBool,
    event: Event,
}

impl CancellationToken {
    /// Create a token that is not cancelled.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                cancelled: AtomicBool::new(false),
                event: Event::new(),
            }),
        }
    }

    /// Cancel the token and wake every pending [`Cancelled`] future.
    ///
    /// Idempotent.
    pub fn cancel(&self) {
        // Release pairs with the Acquire in is_cancelled()
        self.inner.cancelled.store(true, Ordering::Release);
        self.inner.event.notify(usize::MAX);
    }

    /// Non-blocking check of the cancellation flag.
    ///
    /// ```
    /// use batchan_core::CancellationToken;
    ///
    /// let token = CancellationToken::new();
    /// assert!(!token.is_cancelled());
    ///
    /// token.cancel();
    /// assert!(token.is_cancelled());
    /// ```
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Future that resolves once the token is cancelled.
    ///
    /// Resolves immediately if the token is already cancelled. The future is
    /// `Unpin` and can be polled by reference.
    pub fn cancelled(&self) -> Cancelled<'_> {
        Cancelled {
            token: self,
            listener: None,
        }
    }

    /// Returns `true` if both handles refer to the same underlying signal.
    pub fn same_signal(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Future returned by [`CancellationToken::cancelled()`].
#[derive(Debug)]
pub struct Cancelled<'a> {
    token: &'a CancellationToken,
    listener: Option<EventListener>,
}

impl Future for Cancelled<'_> {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.token.is_cancelled() {
            return Poll::Ready(());
        }

        let listener = match self.listener.take() {
            Some(listener) => listener,
            None => {
                let listener = self.token.inner.event.listen();
                // cancel() may have run between the flag check and listen()
                if self.token.is_cancelled() {
                    return Poll::Ready(());
                }
                listener
            }
        };

        let listener = self.listener.insert(listener);
        match Pin::new(listener).poll(cx) {
            Poll::Ready(()) => {
                self.listener = None;
                Poll::Ready(())
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
