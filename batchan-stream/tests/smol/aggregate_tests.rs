// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use batchan_stream::{AggregateExt, BatchConfig, CancellationToken};
use futures::{stream, StreamExt};
use std::time::Duration;

#[test]
fn test_batches_on_smol() -> anyhow::Result<()> {
    smol::block_on(async {
        // Arrange
        let input = stream::iter(vec![1, 2, 3, 4, 5]);

        // Act
        let batches: Vec<Vec<i32>> = input.batch(2)?.collect().await;

        // Assert
        assert_eq!(batches, vec![vec![1, 2], vec![3, 4], vec![5]]);
        Ok(())
    })
}

#[test]
fn test_idle_timeout_on_smol() -> anyhow::Result<()> {
    smol::block_on(async {
        // Arrange
        let (tx, rx) = async_channel::unbounded::<i32>();
        let config = BatchConfig::new().with_timeout(Duration::from_millis(20));
        let mut batches = rx.aggregate(10, config)?;

        // Act
        tx.send(7).await?;

        // Assert
        assert_eq!(batches.next().await, Some(vec![7]));
        Ok(())
    })
}

#[test]
fn test_cancellation_on_smol() -> anyhow::Result<()> {
    smol::block_on(async {
        // Arrange
        let token = CancellationToken::new();
        let (_tx, rx) = async_channel::unbounded::<i32>();
        let mut batches = rx.aggregate(10, BatchConfig::new().with_cancellation(token.clone()))?;

        // Act
        token.cancel();

        // Assert
        assert_eq!(batches.next().await, None);
        Ok(())
    })
}
