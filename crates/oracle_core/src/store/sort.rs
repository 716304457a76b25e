//! Display-only orderings for the inbox card.
//!
//! # Invariants
//! - Sorting works on snapshots and never changes storage order.
//! - All sorts are stable: ties keep inbox arrival order.

use crate::model::task::{ParseEnumError, Task};
use std::str::FromStr;

/// Inbox sort menu options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InboxSort {
    /// Arrival order, same as `TaskStore::inbox_tasks`.
    #[default]
    CreatedDate,
    /// Highest priority first.
    Priority,
    /// Case-insensitive title order.
    Alphabetical,
}

impl InboxSort {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreatedDate => "created_date",
            Self::Priority => "priority",
            Self::Alphabetical => "alphabetical",
        }
    }

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            Self::CreatedDate => "By Created Date",
            Self::Priority => "By Priority",
            Self::Alphabetical => "Alphabetical",
        }
    }

    pub(crate) fn apply(self, tasks: &mut [Task]) {
        match self {
            Self::CreatedDate => {}
            Self::Priority => tasks.sort_by(|a, b| b.priority.cmp(&a.priority)),
            Self::Alphabetical => tasks.sort_by_cached_key(|task| task.title.to_lowercase()),
        }
    }
}

impl FromStr for InboxSort {
    type Err = ParseEnumError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "created_date" | "created" => Ok(Self::CreatedDate),
            "priority" => Ok(Self::Priority),
            "alphabetical" | "title" => Ok(Self::Alphabetical),
            other => Err(ParseEnumError::new("inbox sort", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::InboxSort;
    use crate::model::task::{Priority, Task};

    fn titles(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|task| task.title.as_str()).collect()
    }

    #[test]
    fn priority_sort_is_descending_and_stable() {
        let mut tasks = vec![
            Task::new("a", Priority::Low).unwrap(),
            Task::new("b", Priority::Urgent).unwrap(),
            Task::new("c", Priority::Low).unwrap(),
            Task::new("d", Priority::High).unwrap(),
        ];
        InboxSort::Priority.apply(&mut tasks);
        assert_eq!(titles(&tasks), ["b", "d", "a", "c"]);
    }

    #[test]
    fn alphabetical_sort_ignores_case() {
        let mut tasks = vec![
            Task::new("banana", Priority::Low).unwrap(),
            Task::new("Apple", Priority::Low).unwrap(),
            Task::new("cherry", Priority::Low).unwrap(),
        ];
        InboxSort::Alphabetical.apply(&mut tasks);
        assert_eq!(titles(&tasks), ["Apple", "banana", "cherry"]);
    }

    #[test]
    fn parse_accepts_empty_as_default() {
        assert_eq!("".parse::<InboxSort>().unwrap(), InboxSort::CreatedDate);
        assert_eq!("Priority".parse::<InboxSort>().unwrap(), InboxSort::Priority);
        assert!("random".parse::<InboxSort>().is_err());
    }
}
