// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Aggregator configuration.
//!
//! A [`BatchConfig`] is assembled up front, either through its `with_*`
//! builder methods or by folding a list of [`BatchOption`]s, and is then moved
//! into the aggregator, which never mutates it. The batch size is not part of
//! the configuration; it is a required argument of
//! [`aggregate`](crate::aggregate()).
//!
//! | Setting | Default |
//! |---|---|
//! | idle timeout | none (no idle flushing) |
//! | split predicate | none (never splits) |
//! | output capacity | [`DEFAULT_OUTPUT_CAPACITY`] |
//! | cancellation | none (a signal that never fires) |
//!
//! # Example
//!
//! ```rust
//! use batchan_stream::{BatchConfig, BatchOption};
//! use std::time::Duration;
//!
//! let built = BatchConfig::<i32>::new()
//!     .with_timeout(Duration::from_millis(50))
//!     .with_output_capacity(4);
//!
//! let folded: BatchConfig<i32> = [
//!     BatchOption::OutputCapacity(2),
//!     BatchOption::Timeout(Duration::from_millis(50)),
//!     BatchOption::OutputCapacity(4),
//! ]
//! .into_iter()
//! .collect();
//!
//! assert_eq!(built.timeout(), folded.timeout());
//! assert_eq!(built.output_capacity(), folded.output_capacity());
//! ```

use batchan_core::{BatchanError, CancellationToken, Result};
use core::fmt::{self, Debug};
use core::time::Duration;
use std::sync::Arc;

/// Output buffer capacity used when none is configured.
pub const DEFAULT_OUTPUT_CAPACITY: usize = 1;

/// Adjacency test deciding whether `next` must start a new batch after `previous`.
///
/// Called with the most recently appended item and the newly arrived one.
pub type SplitPredicate<T> = Arc<dyn Fn(&T, &T) -> bool + Send + Sync>;

/// A single configuration option, applied in order by [`BatchConfig::from_options`].
pub enum BatchOption<T> {
    /// Enable idle flushing after the given duration without a flush.
    Timeout(Duration),
    /// Install a split predicate.
    SplitPredicate(SplitPredicate<T>),
    /// Set the output buffer capacity.
    OutputCapacity(usize),
    /// Install an external cancellation signal.
    Cancellation(CancellationToken),
}

impl<T> BatchOption<T> {
    /// Wrap a closure as a [`BatchOption::SplitPredicate`].
    pub fn split<F>(predicate: F) -> Self
    where
        F: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        Self::SplitPredicate(Arc::new(predicate))
    }
}

impl<T> Debug for BatchOption<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout(duration) => f.debug_tuple("Timeout").field(duration).finish(),
            Self::SplitPredicate(_) => f.debug_tuple("SplitPredicate").field(&"<fn>").finish(),
            Self::OutputCapacity(capacity) => {
                f.debug_tuple("OutputCapacity").field(capacity).finish()
            }
            Self::Cancellation(token) => f.debug_tuple("Cancellation").field(token).finish(),
        }
    }
}

impl<T> Clone for BatchOption<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Timeout(duration) => Self::Timeout(*duration),
            Self::SplitPredicate(predicate) => Self::SplitPredicate(Arc::clone(predicate)),
            Self::OutputCapacity(capacity) => Self::OutputCapacity(*capacity),
            Self::Cancellation(token) => Self::Cancellation(token.clone()),
        }
    }
}

/// Immutable settings for one aggregator run.
pub struct BatchConfig<T> {
    timeout: Option<Duration>,
    split: Option<SplitPredicate<T>>,
    output_capacity: usize,
    cancellation: Option<CancellationToken>,
}

impl<T> BatchConfig<T> {
    /// Configuration with every setting at its default.
    pub fn new() -> Self {
        Self {
            timeout: None,
            split: None,
            output_capacity: DEFAULT_OUTPUT_CAPACITY,
            cancellation: None,
        }
    }

    /// Resolve a sequence of options over the defaults.
    ///
    /// Options are applied in order; a later option overrides an earlier one
    /// for the same setting. No validation happens here.
    pub fn from_options<I>(options: I) -> Self
    where
        I: IntoIterator<Item = BatchOption<T>>,
    {
        options
            .into_iter()
            .fold(Self::new(), |config, option| config.apply(option))
    }

    /// Apply one option, returning the updated configuration.
    #[must_use]
    pub fn apply(self, option: BatchOption<T>) -> Self {
        match option {
            BatchOption::Timeout(duration) => self.with_timeout(duration),
            BatchOption::SplitPredicate(predicate) => Self {
                split: Some(predicate),
                ..self
            },
            BatchOption::OutputCapacity(capacity) => self.with_output_capacity(capacity),
            BatchOption::Cancellation(token) => self.with_cancellation(token),
        }
    }

    /// Flush a non-empty batch once `timeout` has elapsed since the last flush.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Force a batch boundary between `previous` and `next` whenever `predicate` returns `true`.
    #[must_use]
    pub fn with_split_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        self.split = Some(Arc::new(predicate));
        self
    }

    /// Number of finished batches the output buffer holds before flushing blocks.
    #[must_use]
    pub fn with_output_capacity(mut self, capacity: usize) -> Self {
        self.output_capacity = capacity;
        self
    }

    /// Flush the batch in progress and close the output once `token` is cancelled.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn split_predicate(&self) -> Option<&SplitPredicate<T>> {
        self.split.as_ref()
    }

    pub fn output_capacity(&self) -> usize {
        self.output_capacity
    }

    pub fn cancellation(&self) -> Option<&CancellationToken> {
        self.cancellation.as_ref()
    }

    /// Check that an aggregator can run with this configuration and `size`.
    ///
    /// # Errors
    ///
    /// Returns [`BatchanError::InvalidConfiguration`] when `size` is zero, the
    /// output capacity is zero or the idle timeout is zero.
    pub fn validate(&self, size: usize) -> Result<()> {
        if size == 0 {
            return Err(BatchanError::invalid_configuration(
                "batch size must be at least 1",
            ));
        }
        if self.output_capacity == 0 {
            return Err(BatchanError::invalid_configuration(
                "output capacity must be at least 1",
            ));
        }
        if self.timeout == Some(Duration::ZERO) {
            return Err(BatchanError::invalid_configuration(
                "idle timeout must be greater than zero",
            ));
        }
        Ok(())
    }

    pub(crate) fn into_parts(
        self,
    ) -> (
        Option<Duration>,
        Option<SplitPredicate<T>>,
        usize,
        Option<CancellationToken>,
    ) {
        (
            self.timeout,
            self.split,
            self.output_capacity,
            self.cancellation,
        )
    }
}

impl<T> Default for BatchConfig<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for BatchConfig<T> {
    fn clone(&self) -> Self {
        Self {
            timeout: self.timeout,
            split: self.split.clone(),
            output_capacity: self.output_capacity,
            cancellation: self.cancellation.clone(),
        }
    }
}

impl<T> Debug for BatchConfig<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchConfig")
            .field("timeout", &self.timeout)
            .field("split", &self.split.as_ref().map(|_| "<fn>"))
            .field("output_capacity", &self.output_capacity)
            .field("cancellation", &self.cancellation)
            .finish()
    }
}

impl<T> FromIterator<BatchOption<T>> for BatchConfig<T> {
    fn from_iter<I: IntoIterator<Item = BatchOption<T>>>(iter: I) -> Self {
        Self::from_options(iter)
    }
}
