//! # Weekender Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - Configuration loading (environment, JSON and TOML files)
//! - An in-memory notification store
//! - A tokio-backed route executor
//! - Tracing subscriber setup
//!
//! ## Architecture
//! - Implements traits defined in `weekender-core`
//! - Depends on `weekender-domain` and `weekender-core`
//! - Contains all "impure" code (I/O, runtime, global subscriber)

pub mod config;
pub mod context;
pub mod errors;
pub mod notifications;
pub mod observability;
pub mod routing;

// Re-export commonly used items
pub use context::ReminderContext;
pub use errors::InfraError;
pub use notifications::InMemoryNotificationCenter;
pub use observability::init_tracing;
pub use routing::TokioRouteExecutor;
