//! Detached background task dispatch with an outstanding-task counter.
//!
//! Cache population and lazy-expiry deletes run as fire-and-forget tasks so a
//! request never waits on them. Each task is tracked by an atomic counter that
//! is incremented before the task is spawned and decremented when it finishes
//! (including on panic or cancellation). Waiters are woken through a
//! [`Notify`] once the counter drains to zero.
//!
//! In wait mode (tests, debugging) [`TaskCoordinator::settle`] blocks until
//! every outstanding task has completed, which lets a caller assert on cache
//! and store state right after an HTTP response. In normal serving `settle`
//! returns immediately.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::sync::Notify;
use tracing::{debug, warn};

#[derive(Debug, Default)]
struct Outstanding {
    count: AtomicUsize,
    idle: Notify,
}

/// Decrements the outstanding counter when dropped.
struct TaskGuard(Arc<Outstanding>);

impl TaskGuard {
    fn acquire(outstanding: Arc<Outstanding>) -> Self {
        outstanding.count.fetch_add(1, Ordering::AcqRel);
        Self(outstanding)
    }
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        if self.0.count.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.0.idle.notify_waiters();
        }
    }
}

/// Spawns best-effort background tasks and tracks how many are still running.
///
/// Cloning is cheap; all clones share one counter.
#[derive(Debug, Clone)]
pub struct TaskCoordinator {
    outstanding: Arc<Outstanding>,
    task_timeout: Duration,
    wait_mode: bool,
}

impl TaskCoordinator {
    /// Creates a coordinator whose tasks are cut off after `task_timeout`.
    pub fn new(task_timeout: Duration) -> Self {
        Self {
            outstanding: Arc::new(Outstanding::default()),
            task_timeout,
            wait_mode: false,
        }
    }

    /// Enables or disables wait mode for [`Self::settle`].
    pub fn with_wait_mode(mut self, wait_mode: bool) -> Self {
        self.wait_mode = wait_mode;
        self
    }

    /// Returns true if [`Self::settle`] blocks until tasks drain.
    pub fn is_wait_mode(&self) -> bool {
        self.wait_mode
    }

    /// Number of spawned tasks that have not finished yet.
    pub fn outstanding(&self) -> usize {
        self.outstanding.count.load(Ordering::Acquire)
    }

    /// Spawns `task` on the runtime without awaiting it.
    ///
    /// Errors and timeouts are logged under `label` and then dropped; they never
    /// reach the caller.
    pub fn spawn<F>(&self, label: &'static str, task: F)
    where
        F: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let guard = TaskGuard::acquire(self.outstanding.clone());
        let task_timeout = self.task_timeout;

        tokio::spawn(async move {
            let _guard = guard;

            match tokio::time::timeout(task_timeout, task).await {
                Ok(Ok(())) => debug!(task = label, "Background task completed"),
                Ok(Err(e)) => {
                    metrics::counter!("linkvault_background_task_failures_total", "task" => label)
                        .increment(1);
                    warn!(task = label, error = %e, "Background task failed");
                }
                Err(_) => {
                    metrics::counter!("linkvault_background_task_failures_total", "task" => label)
                        .increment(1);
                    warn!(
                        task = label,
                        timeout_ms = task_timeout.as_millis() as u64,
                        "Background task timed out"
                    );
                }
            }
        });
    }

    /// Waits until no task is outstanding.
    pub async fn wait_idle(&self) {
        loop {
            let notified = self.outstanding.idle.notified();
            tokio::pin!(notified);
            // Register interest before reading the counter so a wakeup between
            // the load and the await is not lost.
            notified.as_mut().enable();

            if self.outstanding() == 0 {
                return;
            }

            notified.await;
        }
    }

    /// Waits at most `limit` for outstanding tasks to drain.
    ///
    /// Returns false if tasks were still running when the limit elapsed.
    pub async fn wait_idle_timeout(&self, limit: Duration) -> bool {
        tokio::time::timeout(limit, self.wait_idle()).await.is_ok()
    }

    /// Blocks until tasks drain in wait mode; returns immediately otherwise.
    pub async fn settle(&self) {
        if self.wait_mode {
            self.wait_idle().await;
        }
    }
}
