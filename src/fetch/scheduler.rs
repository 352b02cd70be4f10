//! Bounded-concurrency scheduler
//!
//! Dispatches one worker task per target under a global semaphore: a permit
//! is acquired before each task is spawned, so admission follows the target
//! list order and at most `limit` workers execute at any instant. The run
//! call returns only after every spawned task has completed.

use crate::config::Config;
use crate::stats::RunStats;
use reqwest::Client;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Fetches every target with bounded parallelism, then returns
///
/// One worker failing never affects the others; a worker task that dies
/// without reporting (a panic) is still counted as a failure so the final
/// counters always account for every target.
pub async fn run(client: Client, config: Arc<Config>, stats: Arc<RunStats>, targets: Vec<String>) {
    let limit = config.fetch.max_concurrent as usize;
    let run_stats = Arc::clone(&stats);

    let lost = dispatch(targets, limit, move |target| {
        let client = client.clone();
        let config = Arc::clone(&config);
        let stats = Arc::clone(&stats);
        async move {
            super::worker::fetch_target(&client, &config, &stats, &target).await;
        }
    })
    .await;

    for _ in 0..lost {
        tracing::error!("a worker task died before reporting its outcome");
        run_stats.incr_failed();
    }
}

/// Runs `work` for every target with at most `limit` concurrent executions
///
/// Returns the number of tasks that did not run to completion. Generic over
/// the work so the scheduling discipline can be exercised without a network.
pub async fn dispatch<F, Fut>(targets: Vec<String>, limit: usize, work: F) -> usize
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = ()> + Send + 'static,
{
    let semaphore = Arc::new(Semaphore::new(limit));
    let mut handles = Vec::with_capacity(targets.len());

    for target in targets {
        let permit = Arc::clone(&semaphore)
            .acquire_owned()
            .await
            .expect("semaphore is never closed");

        let task = work(target);
        handles.push(tokio::spawn(async move {
            let _permit = permit;
            task.await;
        }));
    }

    let mut lost = 0;
    for handle in handles {
        if handle.await.is_err() {
            lost += 1;
        }
    }

    lost
}
