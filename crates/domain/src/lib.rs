//! # Weekender Domain
//!
//! Business domain types for the weekend reminder engine.
//!
//! This crate contains:
//! - Plan, preference and notification data types
//! - Domain error types and Result definitions
//! - Configuration structures
//! - The identifier namespace and other domain constants
//!
//! ## Architecture
//! - No dependencies on other Weekender crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
