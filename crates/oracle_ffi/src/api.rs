//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Hold the one session-lifetime `FocusSession` for the app process.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Blank titles and unknown ids stay silent no-ops (`ok = true`).
//! - Unparseable enum labels are reported as failures, never guessed.

use log::warn;
use oracle_core::{
    core_version as core_version_inner, default_log_level, init_logging as init_logging_inner,
    ping as ping_inner, FocusSession, InboxSort, PendingSteps, Priority, StaticStepGenerator,
    StepGenerator, StepsApplied, Task, TaskId,
};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use uuid::Uuid;

const LOG_LEVEL_ENV: &str = "ORACLE_LOG_LEVEL";
static APP_STATE: OnceLock<Mutex<AppState>> = OnceLock::new();

/// Process-wide state behind the FFI functions.
struct AppState {
    session: FocusSession,
    generator: Arc<dyn StepGenerator>,
    pending: Option<PendingSteps>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            session: FocusSession::default(),
            generator: Arc::new(StaticStepGenerator::default()),
            pending: None,
        }
    }
}

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive). Empty
///   falls back to `ORACLE_LOG_LEVEL`, then to the build-mode default.
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    let level = resolve_log_level(&level);
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Task row for inbox/focus rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    /// Stable task ID in string form.
    pub task_id: String,
    pub title: String,
    pub notes: Option<String>,
    /// Priority id (`chill|low|medium|high|urgent`).
    pub priority: String,
    pub glyph: String,
    pub color_hex: String,
    /// Status id (`inbox|focus|completed`).
    pub status: String,
    pub created_at: i64,
    pub due_at: Option<i64>,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskActionResponse {
    /// Whether the call was understood. Ignored input still reports `true`.
    pub ok: bool,
    /// Affected task ID, when any.
    pub task_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl TaskActionResponse {
    fn success(message: impl Into<String>, task_id: Option<TaskId>) -> Self {
        Self {
            ok: true,
            task_id: task_id.map(|id| id.to_string()),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            task_id: None,
            message: message.into(),
        }
    }
}

/// Inbox list envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboxListResponse {
    pub items: Vec<TaskItem>,
    /// Effective sort id; `created_date` when the input was rejected.
    pub applied_sort: String,
    pub message: String,
}

/// Focus zone snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusResponse {
    pub task: Option<TaskItem>,
    /// Starter steps for `task`; empty when none were generated.
    pub steps: Vec<String>,
    /// Dismissible message from the last failed step generation.
    pub error: Option<String>,
    /// Whether a step generation is in flight.
    pub steps_pending: bool,
    /// Store revision the snapshot was taken at.
    pub revision: u64,
}

/// Adds a task to the end of the inbox.
#[flutter_rust_bridge::frb(sync)]
pub fn inbox_add(title: String, priority: String) -> TaskActionResponse {
    with_state(|state| add_task(state, &title, &priority, false))
}

/// Adds a task at the front of the inbox so it becomes the focus task.
#[flutter_rust_bridge::frb(sync)]
pub fn inbox_add_and_focus(title: String, priority: String) -> TaskActionResponse {
    with_state(|state| add_task(state, &title, &priority, true))
}

/// Lists inbox tasks with `sort` (`created_date|priority|alphabetical`).
#[flutter_rust_bridge::frb(sync)]
pub fn inbox_list(sort: String) -> InboxListResponse {
    with_state(|state| list_inbox(state, &sort))
}

/// Marks a task completed by ID string.
#[flutter_rust_bridge::frb(sync)]
pub fn task_complete(task_id: String) -> TaskActionResponse {
    with_state(|state| complete_task(state, &task_id))
}

/// Returns the focus zone snapshot.
#[flutter_rust_bridge::frb(sync)]
pub fn focus_current() -> FocusResponse {
    with_state(|state| focus_snapshot(state))
}

/// Promotes a random other inbox task to focus.
#[flutter_rust_bridge::frb(sync)]
pub fn focus_shuffle() -> TaskActionResponse {
    with_state(|state| shuffle_focus(state))
}

/// Starts starter-step generation for the focus task.
///
/// Replaces any generation still in flight.
#[flutter_rust_bridge::frb(sync)]
pub fn focus_request_steps() -> TaskActionResponse {
    with_state(|state| request_steps(state))
}

/// Applies a finished step generation, if one is ready, and returns the
/// focus snapshot.
#[flutter_rust_bridge::frb(sync)]
pub fn focus_poll_steps() -> FocusResponse {
    with_state(|state| {
        poll_steps(state);
        focus_snapshot(state)
    })
}

/// Clears the step-generation error banner.
#[flutter_rust_bridge::frb(sync)]
pub fn focus_dismiss_error() {
    with_state(|state| state.session.dismiss_error());
}

/// Current store revision for cheap change polling.
#[flutter_rust_bridge::frb(sync)]
pub fn store_revision() -> u64 {
    with_state(|state| state.session.store().revision())
}

fn with_state<T>(f: impl FnOnce(&mut AppState) -> T) -> T {
    let mutex = APP_STATE.get_or_init(|| Mutex::new(AppState::default()));
    // Poisoning is ignored: store mutations are single writes.
    let mut guard = mutex.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

fn add_task(state: &mut AppState, title: &str, priority: &str, focus: bool) -> TaskActionResponse {
    let priority = match parse_priority(priority) {
        Ok(priority) => priority,
        Err(message) => return TaskActionResponse::failure(message),
    };

    let store = state.session.store_mut();
    let created = if focus {
        store.add_task_and_focus(title, priority)
    } else {
        store.add_task_to_inbox(title, priority)
    };
    match created {
        Some(id) if focus => TaskActionResponse::success("Task added and focused.", Some(id)),
        Some(id) => TaskActionResponse::success("Task added to inbox.", Some(id)),
        None => TaskActionResponse::success("Ignored blank title.", None),
    }
}

fn list_inbox(state: &AppState, sort: &str) -> InboxListResponse {
    let (applied, message) = match sort.parse::<InboxSort>() {
        Ok(applied) => (applied, None),
        Err(err) => (InboxSort::default(), Some(format!("inbox_list: {err}"))),
    };
    let items: Vec<TaskItem> = state
        .session
        .store()
        .inbox_sorted(applied)
        .iter()
        .map(to_task_item)
        .collect();
    let message = message.unwrap_or_else(|| {
        if items.is_empty() {
            "Your inbox is peacefully empty.".to_string()
        } else {
            format!("{} task(s) in inbox.", items.len())
        }
    });
    InboxListResponse {
        items,
        applied_sort: applied.as_str().to_string(),
        message,
    }
}

fn complete_task(state: &mut AppState, task_id: &str) -> TaskActionResponse {
    let id = match Uuid::parse_str(task_id.trim()) {
        Ok(id) => id,
        Err(err) => {
            return TaskActionResponse::failure(format!("task_complete: invalid task_id: {err}"));
        }
    };
    if state.session.store_mut().mark_completed_by_id(id) {
        TaskActionResponse::success("Task completed.", Some(id))
    } else {
        TaskActionResponse::success("Nothing to complete.", None)
    }
}

fn shuffle_focus(state: &mut AppState) -> TaskActionResponse {
    match state.session.store_mut().pick_random_focus() {
        Some(id) => TaskActionResponse::success("Focus updated.", Some(id)),
        None => TaskActionResponse::success("Inbox is empty.", None),
    }
}

fn request_steps(state: &mut AppState) -> TaskActionResponse {
    match state.session.request_steps(Arc::clone(&state.generator)) {
        Some(pending) => {
            let task_id = pending.task_id();
            state.pending = Some(pending);
            TaskActionResponse::success("Finding first steps.", Some(task_id))
        }
        None => TaskActionResponse::success("No focus task.", None),
    }
}

fn poll_steps(state: &mut AppState) {
    let Some(outcome) = state.pending.as_ref().and_then(PendingSteps::try_take) else {
        return;
    };
    state.pending = None;
    if state.session.apply_steps(outcome) == StepsApplied::Discarded {
        warn!("event=steps_poll module=ffi status=skipped reason=stale_focus");
    }
}

fn focus_snapshot(state: &AppState) -> FocusResponse {
    let session = &state.session;
    FocusResponse {
        task: session.store().focus_task().as_ref().map(to_task_item),
        steps: session
            .steps_for_focus()
            .map(<[String]>::to_vec)
            .unwrap_or_default(),
        error: session.last_error().map(str::to_string),
        steps_pending: state.pending.is_some(),
        revision: session.store().revision(),
    }
}

fn parse_priority(value: &str) -> Result<Priority, String> {
    if value.trim().is_empty() {
        return Ok(Priority::default());
    }
    value.parse::<Priority>().map_err(|err| err.to_string())
}

fn resolve_log_level(level: &str) -> String {
    if !level.trim().is_empty() {
        return level.to_string();
    }
    match std::env::var(LOG_LEVEL_ENV) {
        Ok(raw) if !raw.trim().is_empty() => raw,
        _ => default_log_level().as_str().to_string(),
    }
}

fn to_task_item(task: &Task) -> TaskItem {
    TaskItem {
        task_id: task.id.to_string(),
        title: task.title.clone(),
        notes: task.notes.clone(),
        priority: task.priority.as_str().to_string(),
        glyph: task.priority.glyph().to_string(),
        color_hex: task.priority.color_hex().to_string(),
        status: task.status.as_str().to_string(),
        created_at: task.created_at,
        due_at: task.due_at,
    }
}
