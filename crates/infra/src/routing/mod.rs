//! Route executors

pub mod tokio_executor;

pub use tokio_executor::TokioRouteExecutor;
