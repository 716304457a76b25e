//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `oracle_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use oracle_core::{Priority, TaskStore};

fn main() {
    println!("oracle_core ping={}", oracle_core::ping());
    println!("oracle_core version={}", oracle_core::core_version());

    let mut store = TaskStore::new();
    store.add_task_to_inbox("Buy milk", Priority::Medium);
    store.add_task_and_focus("Call mom", Priority::Urgent);
    let focus = store
        .focus_task()
        .map(|task| format!("{} {}", task.priority.glyph(), task.title))
        .unwrap_or_default();
    println!("oracle_core inbox={} focus={focus}", store.inbox_tasks().len());
}
