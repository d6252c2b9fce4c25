// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # batchan
//!
//! Groups the items of an async stream or channel into batches.
//!
//! A batch is handed downstream as soon as one of these happens:
//!
//! | Trigger | Configured by |
//! |---|---|
//! | the batch holds `size` items | the `size` argument |
//! | the next item must not join the batch | [`BatchConfig::with_split_predicate`] |
//! | nothing was flushed for a while | [`BatchConfig::with_timeout`] |
//! | the input ended | always on |
//! | the cancellation signal fired | [`BatchConfig::with_cancellation`] |
//!
//! Batches are never empty and keep the input order. The output is a bounded
//! buffer ([`BatchConfig::with_output_capacity`]); when it is full the
//! aggregator stops reading input until the consumer catches up.
//!
//! ## Quick Start
//!
//! ```rust
//! use batchan::prelude::*;
//! use std::time::Duration;
//! use tokio::sync::mpsc;
//!
//! # #[tokio::main]
//! # async fn main() -> batchan::Result<()> {
//! let (tx, rx) = mpsc::unbounded_channel();
//! let batches = rx.aggregate(3, BatchConfig::new().with_timeout(Duration::from_millis(100)))?;
//!
//! for letter in ["A", "B", "C", "D", "E"] {
//!     tx.send(letter).expect("aggregator is running");
//! }
//! drop(tx);
//!
//! assert_eq!(batches.recv().await, Some(vec!["A", "B", "C"]));
//! assert_eq!(batches.recv().await, Some(vec!["D", "E"]));
//! assert_eq!(batches.recv().await, None);
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `runtime-tokio` (default) - Tokio spawning and timers, plus [`ReceiverAggregateExt`]
//! - `runtime-smol` - smol spawning and `async-io` timers
//! - `tracing` - route internal logs to `tracing`

#[cfg(feature = "runtime-tokio")]
mod receiver_ext;

#[cfg(feature = "runtime-tokio")]
pub use receiver_ext::ReceiverAggregateExt;

pub use batchan_core::{BatchanError, CancellationToken, Result};
pub use batchan_stream::{
    aggregate, aggregate_with_runtime, AggregateExt, AggregatorStats, BatchConfig, BatchOption,
    BatchReceiver, DefaultRuntime, FlushReason, SplitPredicate, DEFAULT_OUTPUT_CAPACITY,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use batchan_stream::prelude::*;

    #[cfg(feature = "runtime-tokio")]
    pub use crate::ReceiverAggregateExt;
}
