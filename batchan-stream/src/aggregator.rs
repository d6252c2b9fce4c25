// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The aggregator event loop.
//!
//! One spawned task owns the batch in progress and the idle timer. Each
//! iteration waits for exactly one event from the shutdown guard, the
//! cancellation signal, the input stream or the idle timer, reacts to it, and
//! goes back to waiting. The sources are polled in that order, so when several
//! are ready at once shutdown wins over cancellation, cancellation over input
//! and input over the timer. Callers must not rely on that order.
//!
//! Flushing awaits the bounded output channel. While a flush is blocked no
//! further input is polled, which is how a slow consumer slows the producer.

use crate::accumulator::{Accumulator, FlushReason};
use crate::config::BatchConfig;
use crate::stats::StatsRecorder;
use async_channel::Sender;
use batchan_core::{debug, trace, BatchanError, CancellationToken, Result};
use batchan_runtime::runtime::Runtime;
use batchan_runtime::timer::Timer;
use core::future::{poll_fn, Future};
use core::marker::PhantomData;
use core::pin::Pin;
use core::task::Poll;
use core::time::Duration;
use futures::Stream;
use std::sync::Arc;

enum Event<T> {
    Item(T),
    InputClosed,
    IdleTimeout,
    Cancelled,
    Shutdown,
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Termination {
    InputClosed,
    Cancelled,
    Shutdown,
    ReceiverDropped,
}

type SleepFuture<R> = <<R as Runtime>::Timer as Timer>::Sleep;

pub(crate) struct Aggregator<S, T, R>
where
    S: Stream<Item = T>,
    R: Runtime,
{
    input: Pin<Box<S>>,
    accumulator: Accumulator<T>,
    timeout: Option<Duration>,
    timer: R::Timer,
    sleep: Option<Pin<Box<SleepFuture<R>>>>,
    cancellation: CancellationToken,
    output: Sender<Vec<T>>,
    stats: Arc<StatsRecorder>,
    _runtime: PhantomData<R>,
}

impl<S, T, R> Aggregator<S, T, R>
where
    S: Stream<Item = T>,
    R: Runtime,
{
    pub(crate) fn new(
        input: S,
        size: usize,
        config: BatchConfig<T>,
        output: Sender<Vec<T>>,
        stats: Arc<StatsRecorder>,
    ) -> Self {
        let (timeout, split, _capacity, cancellation) = config.into_parts();
        let timer = R::Timer::default();
        let sleep = timeout.map(|duration| Box::pin(timer.sleep_future(duration)));

        Self {
            input: Box::pin(input),
            accumulator: Accumulator::new(size, split),
            timeout,
            timer,
            sleep,
            // An unshared token never fires.
            cancellation: cancellation.unwrap_or_default(),
            output,
            stats,
            _runtime: PhantomData,
        }
    }

    /// Drive the loop until termination, then close the output.
    ///
    /// `shutdown` is signalled when every receiver handle has been dropped.
    pub(crate) async fn run(mut self, shutdown: CancellationToken) {
        debug!(
            "aggregator started: size={}, timeout={:?}, output_capacity={}",
            self.accumulator.size(),
            self.timeout,
            self.output.capacity().unwrap_or_default()
        );

        let termination = match self.event_loop(&shutdown).await {
            Ok(termination) => termination,
            Err(err) => {
                debug!("aggregator stopped delivering: {err}");
                Termination::ReceiverDropped
            }
        };

        self.stats.record_terminated();
        self.output.close();

        let stats = self.stats.snapshot();
        debug!(
            "aggregator terminated ({:?}): {} items received, {} batches emitted, {} items dropped",
            termination,
            stats.items_received,
            stats.batches_emitted,
            stats.items_pending()
        );
    }

    async fn event_loop(&mut self, shutdown: &CancellationToken) -> Result<Termination> {
        loop {
            match self.next_event(shutdown).await {
                Event::Item(item) => {
                    self.stats.record_item();
                    let split = self.accumulator.split_before(&item);
                    if split.is_some() {
                        self.flush(split, FlushReason::Split).await?;
                    }
                    let full = self.accumulator.append(item);
                    if full.is_some() {
                        self.flush(full, FlushReason::Size).await?;
                    }
                }
                Event::IdleTimeout => {
                    let batch = self.accumulator.take();
                    if batch.is_none() {
                        self.stats.record_idle_reset();
                    }
                    self.flush(batch, FlushReason::Timeout).await?;
                }
                Event::InputClosed => {
                    let batch = self.accumulator.take();
                    self.flush(batch, FlushReason::InputClosed).await?;
                    return Ok(Termination::InputClosed);
                }
                Event::Cancelled => {
                    let batch = self.accumulator.take();
                    self.flush(batch, FlushReason::Cancelled).await?;
                    return Ok(Termination::Cancelled);
                }
                Event::Shutdown => {
                    if !self.accumulator.is_empty() {
                        debug!(
                            "receiver dropped with {} items pending",
                            self.accumulator.len()
                        );
                    }
                    return Ok(Termination::Shutdown);
                }
            }
        }
    }

    /// Wait for whichever source becomes ready first and consume exactly one event.
    async fn next_event(&mut self, shutdown: &CancellationToken) -> Event<T> {
        let mut shutdown = shutdown.cancelled();
        let mut cancelled = self.cancellation.cancelled();
        let input = &mut self.input;
        let sleep = &mut self.sleep;

        poll_fn(|cx| {
            if Pin::new(&mut shutdown).poll(cx).is_ready() {
                return Poll::Ready(Event::Shutdown);
            }
            if Pin::new(&mut cancelled).poll(cx).is_ready() {
                return Poll::Ready(Event::Cancelled);
            }
            match input.as_mut().poll_next(cx) {
                Poll::Ready(Some(item)) => return Poll::Ready(Event::Item(item)),
                Poll::Ready(None) => return Poll::Ready(Event::InputClosed),
                Poll::Pending => {}
            }
            if let Some(sleep) = sleep.as_mut() {
                if sleep.as_mut().poll(cx).is_ready() {
                    return Poll::Ready(Event::IdleTimeout);
                }
            }
            Poll::Pending
        })
        .await
    }

    /// Deliver `batch` if there is one, then restart the idle window.
    ///
    /// The window restarts after the send completes, so time spent blocked on
    /// a full output buffer does not count against the next batch.
    async fn flush(&mut self, batch: Option<Vec<T>>, reason: FlushReason) -> Result<()> {
        if let Some(batch) = batch {
            let len = batch.len();
            self.output.send(batch).await.map_err(|_| {
                BatchanError::channel_closed(format!("{reason} flush of {len} items"))
            })?;
            self.stats.record_flush(reason, len);
            trace!("flushed {len} items ({reason})");
        }
        self.reset_timer();
        Ok(())
    }

    fn reset_timer(&mut self) {
        if let Some(duration) = self.timeout {
            self.sleep = Some(Box::pin(self.timer.sleep_future(duration)));
        }
    }
}
