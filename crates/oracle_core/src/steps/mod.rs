//! Starter-step generation seam.
//!
//! # Responsibility
//! - Define the contract for external step generators.
//! - Run one generation off the caller's thread and hand the result back
//!   through a pollable handle.
//!
//! # Invariants
//! - Generator failures carry a human-readable message.
//! - A worker never touches the task store; results are applied by the
//!   owning thread.

pub mod generator;
pub mod pending;
