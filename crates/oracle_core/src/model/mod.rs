//! Domain model for inbox/focus task projections.
//!
//! # Responsibility
//! - Define canonical task data structures used by the store.
//! - Keep display metadata (glyph, color) next to the enums that own it.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Tasks are never hard-deleted; completion is a status change.

pub mod task;
