//! Session task store.
//!
//! # Responsibility
//! - Hold the single canonical `Vec<Task>` for one app session.
//! - Derive inbox/focus views on read; never cache them.
//! - Absorb invalid input (blank titles, unknown ids) as silent no-ops.
//!
//! # Invariants
//! - Task ids are unique within the store; tasks are never removed.
//! - `revision` increases by exactly one per effective mutation.
//! - Listeners run after the mutation is applied, on the mutating thread.

use crate::model::task::{Priority, Task, TaskId};
use crate::store::events::{InsertPosition, ListenerSet, StoreEvent, SubscriptionId};
use crate::store::sort::InboxSort;
use log::debug;
use uuid::Uuid;

/// Input for richer task creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub priority: Priority,
    pub notes: Option<String>,
    /// Unix epoch milliseconds.
    pub due_at: Option<i64>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>, priority: Priority) -> Self {
        Self {
            title: title.into(),
            priority,
            ..Self::default()
        }
    }

    fn into_task(self) -> Option<Task> {
        let mut task = Task::new(&self.title, self.priority).ok()?;
        task.notes = self
            .notes
            .map(|notes| notes.trim().to_string())
            .filter(|notes| !notes.is_empty());
        task.due_at = self.due_at;
        Some(task)
    }
}

/// Single source of truth for all tasks in a session.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    revision: u64,
    listeners: ListenerSet,
}

impl TaskStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// All tasks in storage order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Monotonic change counter for polling readers.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Inbox tasks in arrival order.
    pub fn inbox_tasks(&self) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|task| task.is_inbox())
            .cloned()
            .collect()
    }

    /// Inbox tasks reordered for display.
    pub fn inbox_sorted(&self, sort: InboxSort) -> Vec<Task> {
        let mut tasks = self.inbox_tasks();
        sort.apply(&mut tasks);
        tasks
    }

    pub fn completed_tasks(&self) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|task| task.is_completed())
            .cloned()
            .collect()
    }

    /// Number of tasks not yet completed.
    pub fn open_count(&self) -> usize {
        self.tasks.iter().filter(|task| !task.is_completed()).count()
    }

    /// The first inbox task, if any.
    pub fn focus_task(&self) -> Option<Task> {
        self.tasks.iter().find(|task| task.is_inbox()).cloned()
    }

    fn focus_id(&self) -> Option<TaskId> {
        self.tasks.iter().find(|task| task.is_inbox()).map(|task| task.id)
    }

    /// Appends a new inbox task. Blank titles are ignored.
    pub fn add_task_to_inbox(&mut self, title: &str, priority: Priority) -> Option<TaskId> {
        self.add_task(TaskDraft::new(title, priority))
    }

    /// Inserts a new inbox task at the front so it becomes the focus task.
    /// Blank titles are ignored.
    pub fn add_task_and_focus(&mut self, title: &str, priority: Priority) -> Option<TaskId> {
        self.add_task_and_focus_with(TaskDraft::new(title, priority))
    }

    /// Appends a task built from `draft`.
    pub fn add_task(&mut self, draft: TaskDraft) -> Option<TaskId> {
        self.insert(draft, InsertPosition::Tail)
    }

    /// Inserts a task built from `draft` at the front.
    pub fn add_task_and_focus_with(&mut self, draft: TaskDraft) -> Option<TaskId> {
        self.insert(draft, InsertPosition::Head)
    }

    /// Marks the task with the same identity as `task` completed.
    ///
    /// Returns `false` when nothing changed.
    pub fn mark_completed(&mut self, task: &Task) -> bool {
        self.mark_completed_by_id(task.id)
    }

    pub fn mark_completed_by_id(&mut self, id: TaskId) -> bool {
        let focus_before = self.focus_id();
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            debug!("event=task_complete module=store status=skipped reason=not_found");
            return false;
        };
        if !task.complete() {
            debug!("event=task_complete module=store status=skipped reason=already_completed");
            return false;
        }

        self.revision += 1;
        debug!(
            "event=task_complete module=store status=ok revision={}",
            self.revision
        );
        self.listeners.emit(&StoreEvent::TaskCompleted { id });
        self.emit_focus_change(focus_before);
        true
    }

    /// Moves an inbox task to the front so it becomes the focus task.
    ///
    /// Returns `false` for unknown or non-inbox tasks.
    pub fn promote_to_focus(&mut self, id: TaskId) -> bool {
        let Some(index) = self
            .tasks
            .iter()
            .position(|task| task.id == id && task.is_inbox())
        else {
            return false;
        };
        if self.focus_id() == Some(id) {
            return true;
        }

        let focus_before = self.focus_id();
        let task = self.tasks.remove(index);
        self.tasks.insert(0, task);
        self.revision += 1;
        debug!(
            "event=focus_promote module=store status=ok revision={}",
            self.revision
        );
        self.emit_focus_change(focus_before);
        true
    }

    /// Promotes a random inbox task other than the current focus.
    ///
    /// Returns the resulting focus id, `None` when the inbox is empty.
    pub fn pick_random_focus(&mut self) -> Option<TaskId> {
        self.pick_random_focus_with(|len| (Uuid::new_v4().as_u128() % len as u128) as usize)
    }

    /// Same as `pick_random_focus`, with `picker(len)` choosing the
    /// candidate index. Out-of-range picks wrap around.
    pub fn pick_random_focus_with(&mut self, picker: impl FnOnce(usize) -> usize) -> Option<TaskId> {
        let current = self.focus_id()?;
        let candidates: Vec<TaskId> = self
            .tasks
            .iter()
            .filter(|task| task.is_inbox() && task.id != current)
            .map(|task| task.id)
            .collect();
        if candidates.is_empty() {
            return Some(current);
        }

        let chosen = candidates[picker(candidates.len()) % candidates.len()];
        self.promote_to_focus(chosen);
        Some(chosen)
    }

    /// Registers a change listener.
    pub fn subscribe(&mut self, listener: impl Fn(&StoreEvent) + Send + 'static) -> SubscriptionId {
        self.listeners.insert(Box::new(listener))
    }

    /// Removes a listener. Returns `false` for unknown ids.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn insert(&mut self, draft: TaskDraft, position: InsertPosition) -> Option<TaskId> {
        let Some(task) = draft.into_task() else {
            debug!("event=task_add module=store status=skipped reason=blank_title");
            return None;
        };

        let focus_before = self.focus_id();
        let id = task.id;
        match position {
            InsertPosition::Head => self.tasks.insert(0, task),
            InsertPosition::Tail => self.tasks.push(task),
        }
        self.revision += 1;
        debug!(
            "event=task_add module=store status=ok position={} revision={}",
            position_label(position),
            self.revision
        );
        self.listeners.emit(&StoreEvent::TaskAdded { id, position });
        self.emit_focus_change(focus_before);
        Some(id)
    }

    fn emit_focus_change(&self, before: Option<TaskId>) {
        let after = self.focus_id();
        if after != before {
            self.listeners.emit(&StoreEvent::FocusChanged { id: after });
        }
    }
}

fn position_label(position: InsertPosition) -> &'static str {
    match position {
        InsertPosition::Head => "head",
        InsertPosition::Tail => "tail",
    }
}

#[cfg(test)]
mod tests {
    use super::{TaskDraft, TaskStore};
    use crate::model::task::Priority;

    #[test]
    fn draft_drops_blank_notes_and_keeps_due_date() {
        let mut draft = TaskDraft::new("Pay rent", Priority::High);
        draft.notes = Some("   ".to_string());
        draft.due_at = Some(1_700_000_000_000);

        let task = draft.into_task().expect("non-blank draft builds a task");
        assert_eq!(task.notes, None);
        assert_eq!(task.due_at, Some(1_700_000_000_000));
    }

    #[test]
    fn promote_of_current_focus_does_not_bump_revision() {
        let mut store = TaskStore::new();
        let id = store.add_task_to_inbox("a", Priority::Low).unwrap();
        let revision = store.revision();

        assert!(store.promote_to_focus(id));
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn random_pick_wraps_out_of_range_index() {
        let mut store = TaskStore::new();
        store.add_task_to_inbox("a", Priority::Low);
        let b = store.add_task_to_inbox("b", Priority::Low).unwrap();
        store.add_task_to_inbox("c", Priority::Low);

        // candidates are [b, c]; 4 % 2 == 0 selects b
        assert_eq!(store.pick_random_focus_with(|_| 4), Some(b));
        assert_eq!(store.focus_task().map(|task| task.id), Some(b));
    }
}
