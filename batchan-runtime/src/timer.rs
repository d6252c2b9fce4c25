// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt::Debug;
use core::future::Future;
use core::ops::{Add, Sub};
use core::time::Duration;

pub trait Timer: Clone + Send + Sync + Debug + 'static {
    /// Sleep future handed out by [`sleep_future`](Self::sleep_future).
    ///
    /// Must be `Send` because the aggregator owns it inside a spawned task.
    type Sleep: Future<Output = ()> + Send;

    type Instant: Copy
        + Debug
        + Ord
        + Send
        + Sync
        + Add<Duration, Output = Self::Instant>
        + Sub<Self::Instant, Output = Duration>;

    /// Creates a future that completes after `duration`.
    /// The aggregator stores it and polls it across loop iterations.
    fn sleep_future(&self, duration: Duration) -> Self::Sleep;

    /// Returns the current instant on this runtime's clock.
    fn now(&self) -> Self::Instant;
}
