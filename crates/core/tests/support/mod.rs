//! Shared test helpers for `weekender-core` integration tests.
//!
//! These helpers provide an in-memory notification center and a manual route
//! executor so scheduling tests can focus on behaviour instead of plumbing.

#![allow(dead_code)]

pub mod executor;
pub mod fixtures;
pub mod notification_center;
