// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::stats::{AggregatorStats, StatsRecorder};
use async_channel::Receiver;
use batchan_core::BatchanTask;
use core::fmt::{self, Debug};
use core::pin::Pin;
use core::task::{Context, Poll};
use futures::Stream;
use std::sync::Arc;

/// Output side of an aggregator: a stream of non-empty batches.
///
/// Batches arrive in input order and the stream ends once the aggregator
/// terminates, after the final flush has been delivered.
///
/// Clones share the same output buffer. Each batch goes to exactly one
/// clone. The aggregator keeps running while at least one clone is alive;
/// dropping the last one stops it without a final flush.
pub struct BatchReceiver<T> {
    inner: Pin<Box<Receiver<Vec<T>>>>,
    stats: Arc<StatsRecorder>,
    _guard: Arc<TaskGuard>,
}

impl<T> BatchReceiver<T> {
    pub(crate) fn new(
        inner: Receiver<Vec<T>>,
        stats: Arc<StatsRecorder>,
        task: BatchanTask,
    ) -> Self {
        Self {
            inner: Box::pin(inner),
            stats,
            _guard: Arc::new(TaskGuard { task }),
        }
    }

    /// Receive the next batch, or `None` once the output is closed and drained.
    pub async fn recv(&self) -> Option<Vec<T>> {
        self.inner.recv().await.ok()
    }

    /// Snapshot of the aggregator's counters.
    ///
    /// A flush is counted once its batch has been handed to the output
    /// buffer, so a batch can be received shortly before it shows up here.
    pub fn stats(&self) -> AggregatorStats {
        self.stats.snapshot()
    }

    /// `true` once the aggregator has stopped. Set before the output closes.
    ///
    /// Batches already buffered can still be received.
    pub fn is_terminated(&self) -> bool {
        self.stats.is_terminated()
    }

    /// Number of finished batches waiting in the output buffer.
    pub fn buffered(&self) -> usize {
        self.inner.len()
    }
}

impl<T> Clone for BatchReceiver<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Box::pin(Receiver::clone(&self.inner)),
            stats: Arc::clone(&self.stats),
            _guard: Arc::clone(&self._guard),
        }
    }
}

impl<T> Debug for BatchReceiver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchReceiver")
            .field("buffered", &self.inner.len())
            .field("terminated", &self.is_terminated())
            .finish()
    }
}

impl<T> Stream for BatchReceiver<T> {
    type Item = Vec<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

#[derive(Debug)]
struct TaskGuard {
    task: BatchanTask,
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        self.task.cancel();
    }
}
