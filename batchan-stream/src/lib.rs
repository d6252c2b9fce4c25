// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Streaming batch aggregator.
//!
//! [`aggregate`] consumes a stream of items and produces a stream of batches
//! (`Vec<T>`). A batch is flushed downstream on the first of:
//!
//! - **size**: the batch holds `size` items
//! - **split**: the configured predicate says the next item must not share a
//!   batch with the previous one
//! - **idle timeout**: the configured duration passed since the last flush
//! - **input closed**: the upstream stream ended
//! - **cancellation**: the configured [`CancellationToken`] fired
//!
//! Batches are never empty, keep arrival order, and every item lands in
//! exactly one batch. The output buffer is bounded, so a slow consumer slows
//! the aggregator down, which in turn stops pulling from the input.
//!
//! # Overview
//!
//! - **[`aggregate`]** / **[`AggregateExt`]** - start an aggregator
//! - **[`BatchConfig`]** / **[`BatchOption`]** - optional settings
//! - **[`BatchReceiver`]** - the output `Stream<Item = Vec<T>>`
//! - **[`AggregatorStats`]** - per-trigger flush counters
//!
//! # Runtime Support
//!
//! - `runtime-tokio` (default) - spawns on Tokio and uses `tokio::time`
//! - `runtime-smol` - spawns on smol and uses `async-io` timers
//!
//! # Example
//!
//! ```rust
//! use batchan_stream::prelude::*;
//! use futures::StreamExt;
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() -> batchan_core::Result<()> {
//! let config = BatchConfig::new()
//!     .with_timeout(Duration::from_millis(100))
//!     .with_split_predicate(|a: &i32, b: &i32| (a - b).abs() > 1);
//!
//! let batches: Vec<Vec<i32>> = futures::stream::iter([1, 2, 3, 5, 6])
//!     .aggregate(5, config)?
//!     .collect()
//!     .await;
//!
//! assert_eq!(batches, vec![vec![1, 2, 3], vec![5, 6]]);
//! # Ok(())
//! # }
//! ```

mod accumulator;
mod aggregate;
mod aggregator;
mod batch_receiver;
mod config;
mod stats;

pub mod prelude;

pub use accumulator::FlushReason;
pub use aggregate::{aggregate, aggregate_with_runtime, AggregateExt};
pub use batch_receiver::BatchReceiver;
pub use batchan_core::{BatchanError, CancellationToken, Result};
pub use config::{BatchConfig, BatchOption, SplitPredicate, DEFAULT_OUTPUT_CAPACITY};
pub use stats::AggregatorStats;

#[cfg(feature = "runtime-tokio")]
pub use batchan_runtime::impls::tokio::{TokioRuntime, TokioTimer};

#[cfg(feature = "runtime-smol")]
pub use batchan_runtime::impls::smol::{SmolRuntime, SmolTimer};

/// Runtime whose timer [`aggregate`] uses.
#[cfg(feature = "runtime-tokio")]
pub type DefaultRuntime = TokioRuntime;

/// Runtime whose timer [`aggregate`] uses.
#[cfg(all(feature = "runtime-smol", not(feature = "runtime-tokio")))]
pub type DefaultRuntime = SmolRuntime;
