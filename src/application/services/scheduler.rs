//! Handle to the runtime that drives network I/O and the tick source.

use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::runtime::{Handle, TryCurrentError};
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, warn};

#[derive(Debug, Default)]
struct Tasks {
    handles: Vec<AbortHandle>,
    halted: bool,
}

/// Explicit scheduler context shared by the run loop and network services.
///
/// The client runs on a current-thread runtime, so tasks spawned here are
/// interleaved with the tick on one thread and never run in parallel with it.
/// Every spawned task is tracked until [`Scheduler::shutdown`] aborts it.
#[derive(Debug, Clone)]
pub struct Scheduler {
    handle: Handle,
    tasks: Arc<Mutex<Tasks>>,
}

impl Scheduler {
    /// Wraps the runtime the caller is running on.
    ///
    /// # Errors
    /// Returns error when called outside a tokio runtime.
    pub fn try_current() -> Result<Self, TryCurrentError> {
        Handle::try_current().map(Self::from_handle)
    }

    /// Wraps an existing runtime handle.
    #[must_use]
    pub fn from_handle(handle: Handle) -> Self {
        Self {
            handle,
            tasks: Arc::default(),
        }
    }

    /// Spawns a network task.
    ///
    /// After shutdown the task is aborted before it first runs.
    pub fn spawn<F>(&self, task: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        let join = self.handle.spawn(task);
        let mut tasks = self.tasks.lock();
        if tasks.halted {
            warn!("Task spawned after scheduler shutdown; aborting");
            join.abort();
        } else {
            tasks.handles.retain(|h| !h.is_finished());
            tasks.handles.push(join.abort_handle());
        }
        join
    }

    /// Returns the number of tracked tasks that have not finished.
    #[must_use]
    pub fn active_tasks(&self) -> usize {
        self.tasks
            .lock()
            .handles
            .iter()
            .filter(|h| !h.is_finished())
            .count()
    }

    /// Returns whether [`Scheduler::shutdown`] has been called.
    #[must_use]
    pub fn is_halted(&self) -> bool {
        self.tasks.lock().halted
    }

    /// Aborts every tracked task and refuses new ones.
    ///
    /// Aborted tasks drop their futures, closing any socket they own.
    /// Calling it again is a no-op.
    pub fn shutdown(&self) {
        let mut tasks = self.tasks.lock();
        if tasks.halted {
            return;
        }
        tasks.halted = true;

        let handles = std::mem::take(&mut tasks.handles);
        let aborted = handles.iter().filter(|h| !h.is_finished()).count();
        for handle in handles {
            handle.abort();
        }
        debug!(aborted, "Scheduler halted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::pending;

    #[tokio::test]
    async fn test_shutdown_aborts_pending_tasks() {
        let scheduler = Scheduler::try_current().unwrap();
        let first = scheduler.spawn(pending::<()>());
        let second = scheduler.clone().spawn(pending::<()>());
        assert_eq!(scheduler.active_tasks(), 2);

        scheduler.shutdown();

        assert!(first.await.unwrap_err().is_cancelled());
        assert!(second.await.unwrap_err().is_cancelled());
        assert_eq!(scheduler.active_tasks(), 0);
        assert!(scheduler.is_halted());
    }

    #[tokio::test]
    async fn test_finished_tasks_are_not_counted() {
        let scheduler = Scheduler::try_current().unwrap();
        scheduler.spawn(async { 7 }).await.unwrap();

        assert_eq!(scheduler.active_tasks(), 0);
    }

    #[tokio::test]
    async fn test_spawn_after_shutdown_is_cancelled() {
        let scheduler = Scheduler::try_current().unwrap();
        scheduler.shutdown();
        scheduler.shutdown();

        let late = scheduler.spawn(async { 1 });

        assert!(late.await.unwrap_err().is_cancelled());
    }
}
