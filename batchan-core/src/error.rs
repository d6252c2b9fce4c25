// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for the batchan aggregation engine.
//!
//! The engine itself has no recoverable error channel: degenerate runtime
//! situations (an idle timer firing on an empty batch, an upstream that closes,
//! a cancellation request) are normal control flow. Errors only exist at the
//! edges, when a configuration is rejected before the engine starts or when a
//! batch can no longer be delivered.
//!
//! # Examples
//!
//! ```
//! use batchan_core::{BatchanError, Result};
//!
//! fn check_size(size: usize) -> Result<usize> {
//!     if size == 0 {
//!         return Err(BatchanError::invalid_configuration("batch size must be at least 1"));
//!     }
//!     Ok(size)
//! }
//!
//! assert!(check_size(0).is_err());
//! assert_eq!(check_size(3).unwrap(), 3);
//! ```

/// Root error type for all batchan operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BatchanError {
    /// The aggregator was asked to start with a configuration it cannot honor.
    ///
    /// Returned before any task is spawned, e.g. for a batch size of zero,
    /// an output capacity of zero or a zero idle timeout.
    #[error("Invalid configuration: {context}")]
    InvalidConfiguration {
        /// Which setting was rejected and why
        context: String,
    },

    /// A batch could not be delivered because every receiver is gone.
    #[error("Channel closed: {context}")]
    ChannelClosed {
        /// What was being delivered when the channel was found closed
        context: String,
    },
}

impl BatchanError {
    /// Create an invalid configuration error with the given context
    pub fn invalid_configuration(context: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            context: context.into(),
        }
    }

    /// Create a channel closed error with the given context
    pub fn channel_closed(context: impl Into<String>) -> Self {
        Self::ChannelClosed {
            context: context.into(),
        }
    }

    /// Returns `true` if retrying the same call could succeed.
    ///
    /// Nothing in batchan is retried: a rejected configuration stays rejected
    /// and a closed channel never reopens.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        false
    }

    /// Returns `true` if the error was raised by the caller's input rather than at runtime.
    #[must_use]
    pub const fn is_caller_error(&self) -> bool {
        matches!(self, Self::InvalidConfiguration { .. })
    }
}

/// Specialized Result type for batchan operations
pub type Result<T> = core::result::Result<T, BatchanError>;
