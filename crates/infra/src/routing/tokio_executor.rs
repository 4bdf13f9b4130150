//! Route executor backed by a single tokio worker task
//!
//! Tasks are sent over an unbounded channel and run one at a time, so route
//! handlers observe actions in submission order and never run on the thread
//! that emitted them. A panicking handler is logged and does not stop the
//! worker.

use std::panic::{catch_unwind, AssertUnwindSafe};

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};
use weekender_core::{RouteExecutor, RouteTask};
use weekender_domain::{Result, WeekenderError};

/// FIFO executor running route handlers on a dedicated tokio task.
#[derive(Debug)]
pub struct TokioRouteExecutor {
    sender: UnboundedSender<RouteTask>,
    worker: JoinHandle<()>,
}

impl TokioRouteExecutor {
    /// Spawn the worker on the current tokio runtime.
    ///
    /// # Errors
    /// Returns `WeekenderError::Internal` when called outside a runtime.
    pub fn new() -> Result<Self> {
        let handle = Handle::try_current().map_err(|e| {
            WeekenderError::Internal(format!("route executor requires a tokio runtime: {e}"))
        })?;
        Ok(Self::spawn_on(&handle))
    }

    /// Spawn the worker on `handle`.
    pub fn spawn_on(handle: &Handle) -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel::<RouteTask>();
        let worker = handle.spawn(async move {
            while let Some(task) = receiver.recv().await {
                if catch_unwind(AssertUnwindSafe(task)).is_err() {
                    error!("route handler panicked");
                }
            }
            debug!("route executor stopped");
        });
        Self { sender, worker }
    }

    /// Whether the worker task is still accepting work.
    pub fn is_running(&self) -> bool {
        !self.worker.is_finished()
    }
}

impl RouteExecutor for TokioRouteExecutor {
    fn execute(&self, task: RouteTask) {
        if self.sender.send(task).is_err() {
            warn!("route executor is shut down; dropping route task");
        }
    }
}

impl Drop for TokioRouteExecutor {
    fn drop(&mut self) {
        self.worker.abort();
    }
}
