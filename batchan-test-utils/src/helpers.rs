// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::stream::StreamExt;
use futures::Stream;
use std::time::Duration;
use tokio::time::{sleep, timeout};

/// Panics if `stream` yields anything, or ends, within `timeout_ms`.
pub async fn assert_no_element_emitted<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
{
    tokio::select! {
        state = stream.next() => {
            match state {
                Some(_) => panic!("Unexpected element emitted, expected no output."),
                None => panic!("Stream ended, expected it to stay open."),
            }
        }
        _ = sleep(Duration::from_millis(timeout_ms)) => {
        }
    }
}

/// Next item of `stream`, panicking on timeout or end of stream.
pub async fn unwrap_stream<S, T>(stream: &mut S, timeout_ms: u64) -> T
where
    S: Stream<Item = T> + Unpin,
{
    match timeout(Duration::from_millis(timeout_ms), stream.next()).await {
        Ok(Some(item)) => item,
        Ok(None) => panic!("Expected an item but stream ended"),
        Err(_) => panic!("Timeout: No item received within {timeout_ms} ms"),
    }
}

/// Panics unless `stream` ends within `timeout_ms`.
pub async fn assert_stream_ended<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
{
    match timeout(Duration::from_millis(timeout_ms), stream.next()).await {
        Ok(None) => {}
        Ok(Some(_)) => panic!("Expected stream to end but it emitted an item"),
        Err(_) => panic!("Timeout: stream did not end within {timeout_ms} ms"),
    }
}

/// Drain a stream of batches to its end.
pub async fn collect_batches<S, T>(stream: S) -> Vec<Vec<T>>
where
    S: Stream<Item = Vec<T>>,
{
    stream.collect().await
}
