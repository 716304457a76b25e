//! Core domain logic for Oracle.
//! This crate is the single source of truth for task invariants.

pub mod focus;
pub mod logging;
pub mod model;
pub mod steps;
pub mod store;

pub use focus::session::{FocusSession, FocusSteps, StepsApplied, MAX_STARTER_STEPS};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel};
pub use model::task::{
    now_epoch_ms, ParseEnumError, Priority, Task, TaskId, TaskStatus, TaskValidationError,
};
pub use steps::generator::{StaticStepGenerator, StepGenerationError, StepGenerator};
pub use steps::pending::{spawn_generation, PendingSteps, StepsOutcome};
pub use store::events::{InsertPosition, StoreEvent, SubscriptionId};
pub use store::sort::InboxSort;
pub use store::task_store::{TaskDraft, TaskStore};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
