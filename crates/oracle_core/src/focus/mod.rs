//! Focus zone use-cases.
//!
//! # Responsibility
//! - Pair the task store with starter steps for the current focus task.
//! - Apply generator results on the owning thread.
//!
//! # Invariants
//! - Steps are keyed by task id and only shown for the current focus task.
//! - At most `MAX_STARTER_STEPS` steps are kept.

pub mod session;
