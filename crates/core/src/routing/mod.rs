//! Deferred delivery of notification-driven navigation

pub mod ports;
pub mod route_buffer;

pub use ports::{RouteExecutor, RouteHandler, RouteTask};
pub use route_buffer::RouteBuffer;
