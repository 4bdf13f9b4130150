//! Routing ports

use std::sync::Arc;

use weekender_domain::RouteAction;

/// UI callback that performs navigation.
pub type RouteHandler = Arc<dyn Fn(RouteAction) + Send + Sync>;

/// Unit of work handed to a [`RouteExecutor`].
pub type RouteTask = Box<dyn FnOnce() + Send + 'static>;

/// Runs route handler invocations off the emitting thread.
///
/// Implementations must run tasks one at a time in submission order.
pub trait RouteExecutor: Send + Sync {
    fn execute(&self, task: RouteTask);
}
