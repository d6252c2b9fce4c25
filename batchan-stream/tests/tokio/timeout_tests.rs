// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use batchan_stream::{AggregateExt, BatchConfig, FlushReason};
use batchan_test_utils::test_data::{people, person_alice, person_bob, person_charlie};
use batchan_test_utils::{
    assert_no_element_emitted, assert_stream_ended, test_channel, unwrap_stream,
};
use std::time::Duration;

fn idle_after(millis: u64) -> BatchConfig<batchan_test_utils::Person> {
    BatchConfig::new().with_timeout(Duration::from_millis(millis))
}

#[tokio::test(start_paused = true)]
async fn test_partial_batch_flushed_after_timeout() -> anyhow::Result<()> {
    // Arrange
    let (tx, input) = test_channel();
    let mut batches = input.aggregate(10, idle_after(100))?;

    // Act
    tx.send(person_alice())?;
    tx.send(person_bob())?;

    // Assert
    assert_no_element_emitted(&mut batches, 50).await;
    assert_eq!(
        unwrap_stream(&mut batches, 200).await,
        vec![person_alice(), person_bob()]
    );
    assert_eq!(batches.stats().flushes(FlushReason::Timeout), 1);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_slow_input_yields_one_batch_per_item() -> anyhow::Result<()> {
    // Arrange
    let (tx, input) = test_channel();
    let mut batches = input.aggregate(10, idle_after(100))?;

    // Act & Assert
    for person in people() {
        tx.send(person.clone())?;
        assert_eq!(unwrap_stream(&mut batches, 150).await, vec![person]);
    }

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_appends_do_not_restart_idle_window() -> anyhow::Result<()> {
    // Arrange
    let (tx, input) = test_channel();
    let mut batches = input.aggregate(10, idle_after(100))?;

    // Act
    tx.send(person_alice())?;
    assert_no_element_emitted(&mut batches, 60).await;
    tx.send(person_bob())?;
    assert_no_element_emitted(&mut batches, 30).await;

    // Assert: still due at t=100, measured from the previous flush
    assert_eq!(
        unwrap_stream(&mut batches, 20).await,
        vec![person_alice(), person_bob()]
    );

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_size_flush_restarts_idle_window() -> anyhow::Result<()> {
    // Arrange
    let (tx, input) = test_channel();
    let mut batches = input.aggregate(2, idle_after(100))?;

    // Act
    tx.send(person_alice())?;
    assert_no_element_emitted(&mut batches, 50).await;
    tx.send(person_bob())?;
    assert_eq!(
        unwrap_stream(&mut batches, 10).await,
        vec![person_alice(), person_bob()]
    );
    tx.send(person_charlie())?;

    // Assert: the window restarted at t=50, so nothing is due at t=100
    assert_no_element_emitted(&mut batches, 80).await;
    assert_eq!(unwrap_stream(&mut batches, 50).await, vec![person_charlie()]);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_idle_tick_on_empty_batch_emits_nothing() -> anyhow::Result<()> {
    // Arrange
    let (tx, input) = test_channel();
    let mut batches = input.aggregate(10, idle_after(100))?;

    // Act
    assert_no_element_emitted(&mut batches, 250).await;

    // Assert
    let stats = batches.stats();
    assert_eq!(stats.idle_resets, 2);
    assert_eq!(stats.batches_emitted, 0);

    // The last empty tick at t=200 restarted the window
    tx.send(person_alice())?;
    assert_no_element_emitted(&mut batches, 40).await;
    assert_eq!(unwrap_stream(&mut batches, 20).await, vec![person_alice()]);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_close_flushes_before_timeout() -> anyhow::Result<()> {
    // Arrange
    let (tx, input) = test_channel();
    let mut batches = input.aggregate(10, idle_after(1_000))?;

    // Act
    tx.send(person_alice())?;
    tx.send(person_bob())?;
    drop(tx);

    // Assert
    assert_eq!(
        unwrap_stream(&mut batches, 100).await,
        vec![person_alice(), person_bob()]
    );
    assert_stream_ended(&mut batches, 100).await;
    assert_eq!(batches.stats().flushes(FlushReason::InputClosed), 1);

    Ok(())
}
