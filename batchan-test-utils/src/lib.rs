// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the batchan workspace.
//!
//! Designed for development and tests only.
//!
//! Tests drive an aggregator imperatively: push items through the sender half
//! of [`test_channel`], then observe batches on the receiver. Dropping the
//! sender closes the input stream.
//!
//! ```rust
//! use batchan_test_utils::{test_channel, unwrap_stream};
//! use batchan_test_utils::test_data::person_alice;
//!
//! # async fn example() {
//! let (tx, mut stream) = test_channel();
//! tx.send(person_alice()).unwrap();
//!
//! let item = unwrap_stream(&mut stream, 100).await;
//! assert_eq!(item, person_alice());
//! # }
//! ```
//!
//! # Module Organization
//!
//! - `helpers` - async assertion helpers
//! - `person` - the `Person` fixture type
//! - `test_data` - predefined fixtures

pub mod helpers;
pub mod person;
pub mod test_data;

use futures::stream::{self, Stream};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

pub use helpers::{assert_no_element_emitted, assert_stream_ended, collect_batches, unwrap_stream};
pub use person::Person;

/// Unbounded channel whose receiver is a `Stream`.
///
/// The stream ends once every sender has been dropped.
pub fn test_channel<T: Send + 'static>() -> (
    mpsc::UnboundedSender<T>,
    impl Stream<Item = T> + Send + Unpin,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    (tx, UnboundedReceiverStream::new(rx))
}

/// A stream that yields `items` and then ends.
pub fn stream_of<I>(items: I) -> impl Stream<Item = I::Item> + Send + Unpin
where
    I: IntoIterator,
    I::IntoIter: Send + Unpin,
{
    stream::iter(items)
}
