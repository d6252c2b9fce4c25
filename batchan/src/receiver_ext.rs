// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Aggregation straight from Tokio channel receivers.

use batchan_core::Result;
use batchan_stream::{aggregate, BatchConfig, BatchReceiver};
use tokio::sync::mpsc;
use tokio_stream::wrappers::{ReceiverStream, UnboundedReceiverStream};

/// Extension trait aggregating the items of a Tokio `mpsc` receiver.
///
/// The input ends once every sender of the channel has been dropped, which
/// flushes the final partial batch and ends the [`BatchReceiver`].
pub trait ReceiverAggregateExt<T> {
    /// Aggregate the received items into batches of at most `size` items.
    ///
    /// # Errors
    ///
    /// Returns [`BatchanError::InvalidConfiguration`](batchan_core::BatchanError::InvalidConfiguration)
    /// for a zero `size`, a zero output capacity or a zero idle timeout.
    fn aggregate(self, size: usize, config: BatchConfig<T>) -> Result<BatchReceiver<T>>;

    /// [`aggregate`](Self::aggregate) with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when `size` is zero.
    fn batch(self, size: usize) -> Result<BatchReceiver<T>>
    where
        Self: Sized,
    {
        self.aggregate(size, BatchConfig::default())
    }
}

impl<T: Send + 'static> ReceiverAggregateExt<T> for mpsc::UnboundedReceiver<T> {
    fn aggregate(self, size: usize, config: BatchConfig<T>) -> Result<BatchReceiver<T>> {
        aggregate(UnboundedReceiverStream::new(self), size, config)
    }
}

impl<T: Send + 'static> ReceiverAggregateExt<T> for mpsc::Receiver<T> {
    fn aggregate(self, size: usize, config: BatchConfig<T>) -> Result<BatchReceiver<T>> {
        aggregate(ReceiverStream::new(self), size, config)
    }
}
