// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use batchan_stream::{
    aggregate, aggregate_with_runtime, AggregateExt, BatchConfig, BatchanError, FlushReason,
    BatchReceiver, TokioRuntime,
};
use batchan_test_utils::test_data::{people, person_alice, person_bob, person_charlie};
use batchan_test_utils::{
    assert_no_element_emitted, assert_stream_ended, collect_batches, stream_of, test_channel,
    unwrap_stream,
};
use futures::StreamExt;
use std::time::Duration;

fn assert_unpin<T: Unpin>() {}

#[tokio::test]
async fn test_batches_of_exact_size() -> anyhow::Result<()> {
    // Arrange
    let input = stream_of(vec![1, 2, 3, 4, 5, 6]);

    // Act
    let batches = collect_batches(aggregate(input, 2, BatchConfig::default())?).await;

    // Assert
    assert_eq!(batches, vec![vec![1, 2], vec![3, 4], vec![5, 6]]);

    Ok(())
}

#[tokio::test]
async fn test_remainder_flushed_on_close() -> anyhow::Result<()> {
    // Arrange
    let input = stream_of(vec![10, 20, 30, 40, 50]);

    // Act
    let batches = collect_batches(aggregate(input, 2, BatchConfig::default())?).await;

    // Assert
    assert_eq!(batches, vec![vec![10, 20], vec![30, 40], vec![50]]);

    Ok(())
}

#[tokio::test]
async fn test_letters_in_batches_of_three() -> anyhow::Result<()> {
    // Arrange
    let input = stream_of(["A", "B", "C", "D", "E"]);

    // Act
    let batches = collect_batches(input.aggregate(3, BatchConfig::default())?).await;

    // Assert
    assert_eq!(batches, vec![vec!["A", "B", "C"], vec!["D", "E"]]);

    Ok(())
}

#[tokio::test]
async fn test_empty_input_emits_nothing() -> anyhow::Result<()> {
    // Arrange
    let input = stream_of(Vec::<i32>::new());

    // Act
    let batches = collect_batches(aggregate(input, 3, BatchConfig::default())?).await;

    // Assert
    assert!(batches.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_size_one_emits_every_item() -> anyhow::Result<()> {
    // Arrange
    let input = stream_of(people());

    // Act
    let batches = collect_batches(input.batch(1)?).await;

    // Assert
    assert_eq!(batches.len(), 5);
    assert!(batches.iter().all(|batch| batch.len() == 1));
    assert_eq!(batches.concat(), people());

    Ok(())
}

#[tokio::test]
async fn test_size_larger_than_input() -> anyhow::Result<()> {
    // Arrange
    let input = stream_of(vec![1, 2, 3]);

    // Act
    let batches = collect_batches(input.batch(100)?).await;

    // Assert
    assert_eq!(batches, vec![vec![1, 2, 3]]);

    Ok(())
}

#[tokio::test]
async fn test_size_far_above_input_length() -> anyhow::Result<()> {
    // Arrange
    let small = stream_of(vec![1, 2, 3]);
    let large = stream_of(vec![4, 5]);

    // Act
    let unbounded = collect_batches(small.batch(usize::MAX)?).await;
    let huge = collect_batches(large.batch(1 << 40)?).await;

    // Assert
    assert_eq!(unbounded, vec![vec![1, 2, 3]]);
    assert_eq!(huge, vec![vec![4, 5]]);

    Ok(())
}

#[tokio::test]
async fn test_receiver_polled_without_pinning() -> anyhow::Result<()> {
    // Arrange
    assert_unpin::<BatchReceiver<i32>>();
    let mut batches = stream_of(vec![1, 2, 3]).batch(2)?;

    // Act
    let first = batches.next().await;
    let second = batches.next().await;
    let end = batches.next().await;

    // Assert
    assert_eq!(first, Some(vec![1, 2]));
    assert_eq!(second, Some(vec![3]));
    assert_eq!(end, None);

    Ok(())
}

#[tokio::test]
async fn test_every_item_in_exactly_one_batch() -> anyhow::Result<()> {
    // Arrange
    let items: Vec<u32> = (0..1_000).collect();
    let size = 7;

    // Act
    let batches = collect_batches(stream_of(items.clone()).batch(size)?).await;

    // Assert
    assert_eq!(batches.concat(), items);
    let (last, full) = batches.split_last().expect("at least one batch");
    assert!(full.iter().all(|batch| batch.len() == size));
    assert!((1..=size).contains(&last.len()));

    Ok(())
}

#[tokio::test]
async fn test_output_closes_after_input_closes() -> anyhow::Result<()> {
    // Arrange
    let (tx, input) = test_channel();
    let mut batches = input.batch(2)?;

    // Act
    tx.send(person_alice())?;
    tx.send(person_bob())?;
    tx.send(person_charlie())?;

    // Assert
    assert_eq!(
        unwrap_stream(&mut batches, 500).await,
        vec![person_alice(), person_bob()]
    );
    assert_no_element_emitted(&mut batches, 50).await;

    drop(tx);

    assert_eq!(unwrap_stream(&mut batches, 500).await, vec![person_charlie()]);
    assert_stream_ended(&mut batches, 500).await;

    Ok(())
}

#[tokio::test]
async fn test_recv_until_closed() -> anyhow::Result<()> {
    // Arrange
    let batches = stream_of(vec![1, 2, 3]).batch(2)?;

    // Act
    let first = batches.recv().await;
    let second = batches.recv().await;
    let end = batches.recv().await;

    // Assert
    assert_eq!(first, Some(vec![1, 2]));
    assert_eq!(second, Some(vec![3]));
    assert_eq!(end, None);
    assert!(batches.is_terminated());

    Ok(())
}

#[tokio::test]
async fn test_stats_after_completion() -> anyhow::Result<()> {
    // Arrange
    let batches = stream_of(vec![1, 2, 3, 4, 5]).batch(2)?;
    let observer = batches.clone();

    // Act
    let collected = collect_batches(batches).await;
    let stats = observer.stats();

    // Assert
    assert_eq!(collected.len(), 3);
    assert_eq!(stats.items_received, 5);
    assert_eq!(stats.items_emitted, 5);
    assert_eq!(stats.batches_emitted, 3);
    assert_eq!(stats.flushes(FlushReason::Size), 2);
    assert_eq!(stats.flushes(FlushReason::InputClosed), 1);
    assert_eq!(stats.items_pending(), 0);
    assert!(stats.terminated);

    Ok(())
}

#[tokio::test]
async fn test_explicit_runtime() -> anyhow::Result<()> {
    // Arrange
    let input = stream_of(vec![1, 2, 3]);
    let config = BatchConfig::new().with_timeout(Duration::from_secs(1));

    // Act
    let batches =
        collect_batches(aggregate_with_runtime::<TokioRuntime, _, _>(input, 2, config)?).await;

    // Assert
    assert_eq!(batches, vec![vec![1, 2], vec![3]]);

    Ok(())
}

#[test]
fn test_zero_size_is_rejected() {
    // Arrange
    let input = stream_of(vec![1, 2, 3]);

    // Act
    let result = aggregate(input, 0, BatchConfig::default());

    // Assert
    assert!(matches!(
        result.unwrap_err(),
        BatchanError::InvalidConfiguration { .. }
    ));
}

#[test]
fn test_zero_capacity_is_rejected() {
    // Arrange
    let config = BatchConfig::new().with_output_capacity(0);

    // Act
    let result = stream_of(vec![1]).aggregate(1, config);

    // Assert
    let err = result.unwrap_err();
    assert!(err.is_caller_error());
    assert!(err.to_string().contains("output capacity"));
}

#[test]
fn test_zero_timeout_is_rejected() {
    // Arrange
    let config = BatchConfig::new().with_timeout(Duration::ZERO);

    // Act
    let result = stream_of(vec![1]).aggregate(1, config);

    // Assert
    assert!(result.is_err());
}
