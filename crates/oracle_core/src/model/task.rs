//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record shared by inbox and focus views.
//! - Provide validation for construction and deserialization paths.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `title` is non-empty after trimming.
//! - `priority` is display-only and never affects storage order.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier for every task.
pub type TaskId = Uuid;

/// Five-level ordinal classification, lowest first.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Chill,
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// All priorities in ascending order.
    pub const ALL: [Priority; 5] = [
        Priority::Chill,
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Urgent,
    ];

    /// Stable lowercase id used on the FFI boundary.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Chill => "chill",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }

    /// User-facing label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Chill => "Chill",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Urgent => "Urgent",
        }
    }

    /// Emoji glyph shown next to the task title.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Chill => "🧊",
            Self::Low => "🌱",
            Self::Medium => "🌤",
            Self::High => "🔥",
            Self::Urgent => "🚨",
        }
    }

    /// Accent color as `#RRGGBB`.
    pub fn color_hex(self) -> &'static str {
        match self {
            Self::Chill => "#5AC8FA",
            Self::Low => "#34C759",
            Self::Medium => "#FFCC00",
            Self::High => "#FF9500",
            Self::Urgent => "#FF3B30",
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ParseEnumError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "chill" => Ok(Self::Chill),
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            other => Err(ParseEnumError::new("priority", other)),
        }
    }
}

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Waiting in arrival order.
    Inbox,
    /// Reserved for an explicitly promoted task; the store keeps focus
    /// positional and does not assign it today.
    Focus,
    /// Done. Terminal in practice, not enforced.
    Completed,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inbox => "inbox",
            Self::Focus => "focus",
            Self::Completed => "completed",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = ParseEnumError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "inbox" => Ok(Self::Inbox),
            "focus" => Ok(Self::Focus),
            "completed" => Ok(Self::Completed),
            other => Err(ParseEnumError::new("task status", other)),
        }
    }
}

/// Failure to parse one of the model's label enums from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Display for ParseEnumError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unsupported {} `{}`", self.kind, self.value)
    }
}

impl Error for ParseEnumError {}

/// Validation failures for task construction and decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    BlankTitle,
    NilId,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "task title must not be blank"),
            Self::NilId => write!(f, "task id must not be nil"),
        }
    }
}

impl Error for TaskValidationError {}

/// Canonical task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaskWire")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub notes: Option<String>,
    pub priority: Priority,
    pub status: TaskStatus,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds. May be in the past.
    pub due_at: Option<i64>,
}

#[derive(Deserialize)]
struct TaskWire {
    id: TaskId,
    title: String,
    notes: Option<String>,
    priority: Priority,
    status: TaskStatus,
    created_at: i64,
    due_at: Option<i64>,
}

impl TryFrom<TaskWire> for Task {
    type Error = TaskValidationError;

    fn try_from(value: TaskWire) -> Result<Self, Self::Error> {
        let task = Self {
            id: value.id,
            title: value.title,
            notes: value.notes,
            priority: value.priority,
            status: value.status,
            created_at: value.created_at,
            due_at: value.due_at,
        };
        task.validate()?;
        Ok(task)
    }
}

impl Task {
    /// Creates an inbox task with a generated stable ID.
    ///
    /// # Errors
    /// - `BlankTitle` when `title` is empty after trimming.
    pub fn new(title: &str, priority: Priority) -> Result<Self, TaskValidationError> {
        Self::with_id(Uuid::new_v4(), title, priority)
    }

    /// Creates an inbox task with a caller-provided ID.
    ///
    /// The title is stored trimmed.
    pub fn with_id(
        id: TaskId,
        title: &str,
        priority: Priority,
    ) -> Result<Self, TaskValidationError> {
        let task = Self {
            id,
            title: title.trim().to_string(),
            notes: None,
            priority,
            status: TaskStatus::Inbox,
            created_at: now_epoch_ms(),
            due_at: None,
        };
        task.validate()?;
        Ok(task)
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.is_nil() {
            return Err(TaskValidationError::NilId);
        }
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::BlankTitle);
        }
        Ok(())
    }

    pub fn is_inbox(&self) -> bool {
        self.status == TaskStatus::Inbox
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Sets status to `completed`. Returns `false` when already completed.
    pub fn complete(&mut self) -> bool {
        if self.is_completed() {
            return false;
        }
        self.status = TaskStatus::Completed;
        true
    }
}

/// Current wall-clock time in Unix epoch milliseconds.
///
/// Falls back to `0` if the clock reads before the epoch.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
