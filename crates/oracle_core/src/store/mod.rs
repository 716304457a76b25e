//! In-memory task store and its derived views.
//!
//! # Responsibility
//! - Own the canonical task list for one app session.
//! - Expose inbox/focus projections and silent-no-op mutations.
//! - Publish change notifications through revisions and listeners.
//!
//! # Invariants
//! - Storage order is arrival order, except head inserts and promotions.
//! - Rejected input never bumps the revision or notifies listeners.

pub mod events;
pub mod sort;
pub mod task_store;
