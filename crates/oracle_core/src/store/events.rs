//! Change notifications emitted by `TaskStore`.

use crate::model::task::TaskId;
use std::collections::BTreeMap;

/// Where a new task landed in storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    Head,
    Tail,
}

/// One effective store mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    TaskAdded {
        id: TaskId,
        position: InsertPosition,
    },
    TaskCompleted {
        id: TaskId,
    },
    /// The focus task changed; `None` when the inbox became empty.
    FocusChanged {
        id: Option<TaskId>,
    },
}

/// Handle returned by `TaskStore::subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

pub type StoreListener = Box<dyn Fn(&StoreEvent) + Send>;

/// Registered listeners, called in registration order.
#[derive(Default)]
pub(crate) struct ListenerSet {
    next_id: u64,
    listeners: BTreeMap<u64, StoreListener>,
}

impl ListenerSet {
    pub(crate) fn insert(&mut self, listener: StoreListener) -> SubscriptionId {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.insert(id, listener);
        SubscriptionId(id)
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(&id.0).is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }

    pub(crate) fn emit(&self, event: &StoreEvent) {
        for listener in self.listeners.values() {
            listener(event);
        }
    }
}

impl std::fmt::Debug for ListenerSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerSet")
            .field("len", &self.listeners.len())
            .finish()
    }
}
