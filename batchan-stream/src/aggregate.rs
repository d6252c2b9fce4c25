// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::aggregator::Aggregator;
use crate::batch_receiver::BatchReceiver;
use crate::config::BatchConfig;
use crate::stats::StatsRecorder;
use crate::DefaultRuntime;
use batchan_core::{BatchanTask, Result};
use batchan_runtime::runtime::Runtime;
use futures::Stream;
use std::sync::Arc;

/// Start an aggregator over `input` on the default runtime.
///
/// Items are grouped into batches of at most `size` items. A batch is flushed
/// when it is full, when the split predicate forces a boundary, when the idle
/// timeout elapses since the previous flush, when `input` ends, or when the
/// cancellation signal fires. The returned [`BatchReceiver`] yields the
/// batches in input order and ends after the final flush.
///
/// Must be called from within a running runtime, because the aggregator is
/// spawned as a task.
///
/// # Errors
///
/// Returns [`BatchanError::InvalidConfiguration`](batchan_core::BatchanError::InvalidConfiguration)
/// when `size` is zero, the output capacity is zero or the idle timeout is zero.
/// Nothing is spawned in that case.
///
/// # Example
///
/// ```rust
/// use batchan_stream::{aggregate, BatchConfig};
/// use futures::{stream, StreamExt};
///
/// # #[tokio::main]
/// # async fn main() -> batchan_core::Result<()> {
/// let input = stream::iter(["A", "B", "C", "D", "E"]);
///
/// let batches: Vec<Vec<&str>> = aggregate(input, 3, BatchConfig::default())?
///     .collect()
///     .await;
///
/// assert_eq!(batches, vec![vec!["A", "B", "C"], vec!["D", "E"]]);
/// # Ok(())
/// # }
/// ```
pub fn aggregate<S, T>(input: S, size: usize, config: BatchConfig<T>) -> Result<BatchReceiver<T>>
where
    S: Stream<Item = T> + Send + 'static,
    T: Send + 'static,
{
    aggregate_with_runtime::<DefaultRuntime, S, T>(input, size, config)
}

/// Start an aggregator whose idle timer comes from the runtime `R`.
///
/// Task spawning still follows the runtime feature selected at compile time.
///
/// # Errors
///
/// Same as [`aggregate`].
pub fn aggregate_with_runtime<R, S, T>(
    input: S,
    size: usize,
    config: BatchConfig<T>,
) -> Result<BatchReceiver<T>>
where
    R: Runtime,
    S: Stream<Item = T> + Send + 'static,
    T: Send + 'static,
{
    config.validate(size)?;

    let (sender, receiver) = async_channel::bounded(config.output_capacity());
    let stats = Arc::new(StatsRecorder::default());
    let aggregator = Aggregator::<S, T, R>::new(input, size, config, sender, Arc::clone(&stats));

    let task = BatchanTask::spawn(move |shutdown| aggregator.run(shutdown));

    Ok(BatchReceiver::new(receiver, stats, task))
}

/// Extension trait starting an aggregator directly from a stream.
pub trait AggregateExt<T>: Stream<Item = T> + Sized
where
    T: Send + 'static,
{
    /// Aggregate this stream into batches of at most `size` items.
    ///
    /// See [`aggregate`] for the flush rules.
    ///
    /// # Errors
    ///
    /// Same as [`aggregate`].
    fn aggregate(self, size: usize, config: BatchConfig<T>) -> Result<BatchReceiver<T>>;

    /// Aggregate with the default configuration: size-triggered batches, a
    /// final partial batch when the stream ends, and no idle flushing.
    ///
    /// ```rust
    /// use batchan_stream::AggregateExt;
    /// use futures::{stream, StreamExt};
    ///
    /// # #[tokio::main]
    /// # async fn main() -> batchan_core::Result<()> {
    /// let batches: Vec<Vec<i32>> = stream::iter(1..=6).batch(2)?.collect().await;
    ///
    /// assert_eq!(batches, vec![vec![1, 2], vec![3, 4], vec![5, 6]]);
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error when `size` is zero.
    fn batch(self, size: usize) -> Result<BatchReceiver<T>> {
        self.aggregate(size, BatchConfig::default())
    }

    /// Same as [`aggregate`](Self::aggregate) with the idle timer taken from `R`.
    ///
    /// # Errors
    ///
    /// Same as [`aggregate`].
    fn aggregate_with_runtime<R: Runtime>(
        self,
        size: usize,
        config: BatchConfig<T>,
    ) -> Result<BatchReceiver<T>>;
}

impl<S, T> AggregateExt<T> for S
where
    S: Stream<Item = T> + Send + 'static,
    T: Send + 'static,
{
    fn aggregate(self, size: usize, config: BatchConfig<T>) -> Result<BatchReceiver<T>> {
        aggregate(self, size, config)
    }

    fn aggregate_with_runtime<R: Runtime>(
        self,
        size: usize,
        config: BatchConfig<T>,
    ) -> Result<BatchReceiver<T>> {
        aggregate_with_runtime::<R, S, T>(self, size, config)
    }
}
