// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Concurrent request fan-out
//!
//! Every item becomes a task on a `JoinSet`. Network concurrency is bounded
//! by the [`ApiClient`](crate::client::ApiClient) semaphore, not here, so
//! nested fan-outs (pages within repositories) share one limit.

use std::future::Future;

use tokio::task::JoinSet;

use crate::error::StatsError;

/// Spawn `task(item)` for every item, tagging each result with its index
pub(crate) fn spawn_indexed<I, R, F, Fut>(
    items: Vec<I>,
    task: F,
) -> JoinSet<(usize, Result<R, StatsError>)>
where
    F: Fn(I) -> Fut,
    Fut: Future<Output = Result<R, StatsError>> + Send + 'static,
    R: Send + 'static,
{
    let mut set = JoinSet::new();
    for (index, item) in items.into_iter().enumerate() {
        let future = task(item);
        set.spawn(async move { (index, future.await) });
    }
    set
}

/// Run `task` over all items and return the results in item order
///
/// Fails fast: the first error is returned and the remaining tasks are
/// aborted when the set is dropped.
///
/// # Errors
///
/// Returns the first task error, or `StatsError::TaskFailed` if a task
/// panicked.
pub async fn try_fan_out<I, R, F, Fut>(items: Vec<I>, task: F) -> Result<Vec<R>, StatsError>
where
    F: Fn(I) -> Fut,
    Fut: Future<Output = Result<R, StatsError>> + Send + 'static,
    R: Send + 'static,
{
    let count = items.len();
    let mut set = spawn_indexed(items, task);
    let mut slots: Vec<Option<R>> = std::iter::repeat_with(|| None).take(count).collect();

    while let Some(joined) = set.join_next().await {
        let (index, outcome) = joined.map_err(|e| StatsError::TaskFailed(e.to_string()))?;
        slots[index] = Some(outcome?);
    }

    slots
        .into_iter()
        .collect::<Option<Vec<R>>>()
        .ok_or_else(|| StatsError::TaskFailed("a request task did not report back".to_string()))
}
