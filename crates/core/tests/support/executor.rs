use std::sync::{Arc, Mutex};

use weekender_core::{RouteExecutor, RouteHandler, RouteTask};
use weekender_domain::RouteAction;

/// Executor that holds submitted tasks until the test runs them.
#[derive(Default)]
pub struct ManualExecutor {
    tasks: Mutex<Vec<RouteTask>>,
}

impl ManualExecutor {
    pub fn queued(&self) -> usize {
        self.tasks.lock().unwrap().len()
    }

    /// Run every queued task in submission order; returns how many ran.
    pub fn run_all(&self) -> usize {
        let tasks: Vec<RouteTask> = std::mem::take(&mut *self.tasks.lock().unwrap());
        let count = tasks.len();
        for task in tasks {
            task();
        }
        count
    }
}

impl RouteExecutor for ManualExecutor {
    fn execute(&self, task: RouteTask) {
        self.tasks.lock().unwrap().push(task);
    }
}

/// Handler that records every route it receives.
pub fn recording_handler() -> (RouteHandler, Arc<Mutex<Vec<RouteAction>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let handler: RouteHandler = Arc::new(move |action| sink.lock().unwrap().push(action));
    (handler, seen)
}
