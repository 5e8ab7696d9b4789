//! Shared types for the Ladle back office
//!
//! Common types used across multiple crates: the cart state engine, the
//! order status workflow, error types, response structures and domain
//! models. This crate is pure state logic - no I/O lives here.

pub mod cart;
pub mod error;
pub mod models;
pub mod order;
pub mod response;
pub mod util;
pub mod workflow;

// Re-exports
pub use serde::{Deserialize, Serialize};

// Error re-exports (for convenient access)
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};

// Workflow re-exports
pub use workflow::{Actor, Role};
