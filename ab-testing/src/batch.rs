//! Bounded-concurrency execution for independent tasks

use anyhow::{anyhow, Result};
use futures::{stream::FuturesUnordered, Future, StreamExt};
use std::fmt::Display;
use std::sync::Arc;
use tokio::sync::Semaphore;

use ab_testing_sdk::{log_task_complete, log_task_failed, log_task_start};

/// Context provided to each task in a batch
#[derive(Debug, Clone, Copy)]
pub struct TaskContext {
    /// Stage number (for logging)
    pub stage: usize,
    /// Task number (1-indexed for display)
    pub task_number: usize,
    /// Total number of tasks in this batch
    pub total_tasks: usize,
}

/// Run `task_executor` over `items` with at most `batch_size` in flight
///
/// Results come back in input order. Tasks report their own failures
/// through `R`; one task failing does not stop the others. A `batch_size`
/// of 0 is treated as 1.
///
/// # Example
/// ```no_run
/// # async fn demo() -> anyhow::Result<()> {
/// use ab_testing::batch::execute_batch;
///
/// let doubled = execute_batch(0, vec![1, 2, 3], 2, |item, _ctx| async move { item * 2 }).await?;
/// assert_eq!(doubled, vec![2, 4, 6]);
/// # Ok(())
/// # }
/// ```
pub async fn execute_batch<T, F, Fut, R>(
    stage: usize,
    items: Vec<T>,
    batch_size: usize,
    task_executor: F,
) -> Result<Vec<R>>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T, TaskContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
{
    let total = items.len();
    let sem = Arc::new(Semaphore::new(batch_size.max(1)));
    let executor = Arc::new(task_executor);
    let mut tasks = FuturesUnordered::new();

    for (idx, item) in items.into_iter().enumerate() {
        let sem = sem.clone();
        let executor = executor.clone();

        let ctx = TaskContext {
            stage,
            task_number: idx + 1,
            total_tasks: total,
        };

        tasks.push(async move {
            let _permit = sem
                .acquire()
                .await
                .map_err(|_| anyhow!("Semaphore closed"))?;

            Ok::<_, anyhow::Error>((idx, executor(item, ctx).await))
        });
    }

    let mut slots: Vec<Option<R>> = (0..total).map(|_| None).collect();
    while let Some(result) = tasks.next().await {
        let (idx, value) = result?;
        slots[idx] = Some(value);
    }

    Ok(slots.into_iter().flatten().collect())
}

/// Execute a single task with start/complete/failed events
///
/// `executor` returns the result together with a one-line summary for the
/// completion event.
pub async fn execute_task<F, Fut, R, E>(
    task_id: impl Into<String>,
    description: impl Into<String>,
    ctx: TaskContext,
    executor: F,
) -> std::result::Result<R, E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = std::result::Result<(R, String), E>>,
    E: Display,
{
    let task_id = task_id.into();
    let description = description.into();

    log_task_start!(ctx.stage, &task_id, &description, ctx.total_tasks);

    match executor().await {
        Ok((result, summary)) => {
            log_task_complete!(&task_id, summary);
            Ok(result)
        }
        Err(e) => {
            log_task_failed!(&task_id, e);
            Err(e)
        }
    }
}
