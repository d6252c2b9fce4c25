// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The batch in progress and the synchronous half of every flush decision.
//!
//! [`Accumulator`] owns the items collected since the last flush. It decides
//! *whether* the size and split triggers fire; delivering the resulting batch
//! and resetting the idle timer is the aggregator's job.

use crate::config::SplitPredicate;
use core::fmt::{self, Debug, Display};
use core::mem;

/// Which trigger caused a flush.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlushReason {
    /// The batch reached the configured size.
    Size,
    /// The split predicate forced a boundary before the incoming item.
    Split,
    /// The idle timeout elapsed since the previous flush.
    Timeout,
    /// The input stream ended.
    InputClosed,
    /// The cancellation signal fired.
    Cancelled,
}

impl Display for FlushReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::Size => "size",
            Self::Split => "split",
            Self::Timeout => "timeout",
            Self::InputClosed => "input closed",
            Self::Cancelled => "cancelled",
        };
        f.write_str(reason)
    }
}

// Upper bound on the capacity reserved up front for a batch. Larger batches
// grow on demand.
const PREALLOC_LIMIT: usize = 1024;

pub(crate) struct Accumulator<T> {
    batch: Vec<T>,
    size: usize,
    split: Option<SplitPredicate<T>>,
}

impl<T> Accumulator<T> {
    pub(crate) fn new(size: usize, split: Option<SplitPredicate<T>>) -> Self {
        Self {
            batch: Vec::with_capacity(size.min(PREALLOC_LIMIT)),
            size,
            split,
        }
    }

    /// Takes the current batch if the split predicate puts a boundary between
    /// its last item and `next`. Never consults the predicate on an empty batch.
    pub(crate) fn split_before(&mut self, next: &T) -> Option<Vec<T>> {
        let split = self.split.as_ref()?;
        let previous = self.batch.last()?;
        if split(previous, next) {
            self.take()
        } else {
            None
        }
    }

    /// Appends `item` and takes the batch if it is now full.
    pub(crate) fn append(&mut self, item: T) -> Option<Vec<T>> {
        self.batch.push(item);
        if self.batch.len() >= self.size {
            self.take()
        } else {
            None
        }
    }

    /// Takes the batch in progress, leaving a fresh one. `None` when empty.
    pub(crate) fn take(&mut self) -> Option<Vec<T>> {
        if self.batch.is_empty() {
            return None;
        }
        let fresh = Vec::with_capacity(self.size.min(PREALLOC_LIMIT));
        Some(mem::replace(&mut self.batch, fresh))
    }

    pub(crate) fn len(&self) -> usize {
        self.batch.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.batch.is_empty()
    }

    pub(crate) fn size(&self) -> usize {
        self.size
    }
}

impl<T: Debug> Debug for Accumulator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accumulator")
            .field("batch", &self.batch)
            .field("size", &self.size)
            .field("split", &self.split.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
