// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Runtime-agnostic task spawning with cooperative cancellation.

use crate::CancellationToken;
use core::future::Future;

#[cfg(not(any(feature = "runtime-tokio", feature = "runtime-smol")))]
compile_error!("batchan-core: enable `runtime-tokio` or `runtime-smol` to spawn tasks");

/// Handle to a detached background task that is cancelled when dropped.
///
/// The spawned future receives a [`CancellationToken`] owned by this handle.
/// Dropping the handle (or calling [`cancel`](Self::cancel)) signals the token;
/// the task is expected to observe it and return. Nothing is aborted forcibly.
///
/// # Runtime Support
///
/// - **Tokio**: `tokio::spawn` (feature `runtime-tokio`, default)
/// - **smol**: `smol::spawn` (feature `runtime-smol`, used when Tokio is disabled)
///
/// # Example
///
/// ```rust
/// use batchan_core::BatchanTask;
///
/// # #[tokio::main]
/// # async fn main() {
/// let task = BatchanTask::spawn(|shutdown| async move {
///     shutdown.cancelled().await;
///     println!("graceful shutdown");
/// });
///
/// drop(task);
/// # }
/// ```
#[derive(Debug)]
pub struct BatchanTask {
    shutdown: CancellationToken,
}

impl BatchanTask {
    /// Spawn `f(shutdown)` on the configured runtime.
    ///
    /// With the Tokio runtime this must be called from within a Tokio context.
    pub fn spawn<F, Fut>(f: F) -> Self
    where
        F: FnOnce(CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let shutdown = CancellationToken::new();
        let future = f(shutdown.clone());

        #[cfg(feature = "runtime-tokio")]
        {
            tokio::spawn(future);
        }

        #[cfg(all(feature = "runtime-smol", not(feature = "runtime-tokio")))]
        {
            smol::spawn(future).detach();
        }

        Self { shutdown }
    }

    /// Signal the task to stop without waiting for it.
    pub fn cancel(&self) {
        self.shutdown.cancel();
    }

    /// Returns `true` once [`cancel`](Self::cancel) was called or the handle was dropped.
    pub fn is_cancelled(&self) -> bool {
        self.shutdown.is_cancelled()
    }
}

impl Drop for BatchanTask {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
