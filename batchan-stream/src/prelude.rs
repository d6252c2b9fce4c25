// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Commonly used traits and types.
//!
//! ```ignore
//! use batchan_stream::prelude::*;
//!
//! let config = BatchConfig::new().with_timeout(Duration::from_millis(50));
//! let batches = stream.aggregate(100, config)?;
//! ```

pub use crate::aggregate::AggregateExt;
pub use crate::batch_receiver::BatchReceiver;
pub use crate::config::{BatchConfig, BatchOption};
pub use crate::CancellationToken;
