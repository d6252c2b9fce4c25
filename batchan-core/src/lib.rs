// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Core building blocks shared by the batchan crates.
//!
//! - [`BatchanError`] and the [`Result`] alias
//! - [`CancellationToken`], a runtime-agnostic cancellation signal
//! - [`BatchanTask`], a spawned background task that is cancelled on drop
//! - A logging shim (`error!`, `warn!`, `info!`, `debug!`, `trace!`) that
//!   forwards to `tracing` when the `tracing` feature is enabled

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

pub mod batchan_task;
pub mod cancellation_token;
pub mod error;
pub mod logging;

pub use self::batchan_task::BatchanTask;
pub use self::cancellation_token::{CancellationToken, Cancelled};
pub use self::error::{BatchanError, Result};
