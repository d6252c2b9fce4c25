// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::accumulator::FlushReason;
use core::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Point-in-time counters of one aggregator run.
///
/// Only batches that were actually delivered are counted as flushes; an idle
/// timer firing on an empty batch is counted in `idle_resets`. A flush is
/// recorded after its batch enters the output buffer, so a consumer may see
/// a batch before these counters include it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregatorStats {
    pub items_received: u64,
    pub items_emitted: u64,
    pub batches_emitted: u64,
    pub size_flushes: u64,
    pub split_flushes: u64,
    pub timeout_flushes: u64,
    pub input_closed_flushes: u64,
    pub cancelled_flushes: u64,
    pub idle_resets: u64,
    pub terminated: bool,
}

impl AggregatorStats {
    /// Delivered flushes caused by `reason`.
    pub fn flushes(&self, reason: FlushReason) -> u64 {
        match reason {
            FlushReason::Size => self.size_flushes,
            FlushReason::Split => self.split_flushes,
            FlushReason::Timeout => self.timeout_flushes,
            FlushReason::InputClosed => self.input_closed_flushes,
            FlushReason::Cancelled => self.cancelled_flushes,
        }
    }

    /// Items received but not delivered yet.
    pub fn items_pending(&self) -> u64 {
        self.items_received.saturating_sub(self.items_emitted)
    }
}

// Written only by the aggregator task, read by any receiver handle.
#[derive(Debug, Default)]
pub(crate) struct StatsRecorder {
    items_received: AtomicU64,
    items_emitted: AtomicU64,
    batches_emitted: AtomicU64,
    size_flushes: AtomicU64,
    split_flushes: AtomicU64,
    timeout_flushes: AtomicU64,
    input_closed_flushes: AtomicU64,
    cancelled_flushes: AtomicU64,
    idle_resets: AtomicU64,
    terminated: AtomicBool,
}

impl StatsRecorder {
    pub(crate) fn record_item(&self) {
        self.items_received.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_flush(&self, reason: FlushReason, len: usize) {
        let counter = match reason {
            FlushReason::Size => &self.size_flushes,
            FlushReason::Split => &self.split_flushes,
            FlushReason::Timeout => &self.timeout_flushes,
            FlushReason::InputClosed => &self.input_closed_flushes,
            FlushReason::Cancelled => &self.cancelled_flushes,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        self.batches_emitted.fetch_add(1, Ordering::Relaxed);
        self.items_emitted.fetch_add(len as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_idle_reset(&self) {
        self.idle_resets.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_terminated(&self) {
        self.terminated.store(true, Ordering::Release);
    }

    pub(crate) fn is_terminated(&self) -> bool {
        self.terminated.load(Ordering::Acquire)
    }

    pub(crate) fn snapshot(&self) -> AggregatorStats {
        AggregatorStats {
            items_received: self.items_received.load(Ordering::Relaxed),
            items_emitted: self.items_emitted.load(Ordering::Relaxed),
            batches_emitted: self.batches_emitted.load(Ordering::Relaxed),
            size_flushes: self.size_flushes.load(Ordering::Relaxed),
            split_flushes: self.split_flushes.load(Ordering::Relaxed),
            timeout_flushes: self.timeout_flushes.load(Ordering::Relaxed),
            input_closed_flushes: self.input_closed_flushes.load(Ordering::Relaxed),
            cancelled_flushes: self.cancelled_flushes.load(Ordering::Relaxed),
            idle_resets: self.idle_resets.load(Ordering::Relaxed),
            terminated: self.is_terminated(),
        }
    }
}
