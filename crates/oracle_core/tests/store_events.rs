use oracle_core::{InsertPosition, Priority, StoreEvent, TaskStore};
use std::sync::{Arc, Mutex};

fn recording_store() -> (TaskStore, Arc<Mutex<Vec<StoreEvent>>>) {
    let mut store = TaskStore::new();
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    store.subscribe(move |event| sink.lock().unwrap().push(event.clone()));
    (store, events)
}

#[test]
fn listeners_see_events_in_mutation_order() {
    let (mut store, events) = recording_store();

    let milk = store.add_task_to_inbox("Buy milk", Priority::Medium).unwrap();
    let mom = store.add_task_and_focus("Call mom", Priority::Urgent).unwrap();
    store.mark_completed_by_id(mom);

    assert_eq!(
        *events.lock().unwrap(),
        vec![
            StoreEvent::TaskAdded {
                id: milk,
                position: InsertPosition::Tail,
            },
            StoreEvent::FocusChanged { id: Some(milk) },
            StoreEvent::TaskAdded {
                id: mom,
                position: InsertPosition::Head,
            },
            StoreEvent::FocusChanged { id: Some(mom) },
            StoreEvent::TaskCompleted { id: mom },
            StoreEvent::FocusChanged { id: Some(milk) },
        ]
    );
    assert_eq!(store.revision(), 3);
}

#[test]
fn tail_insert_behind_focus_does_not_report_focus_change() {
    let (mut store, events) = recording_store();
    store.add_task_to_inbox("a", Priority::Low);
    events.lock().unwrap().clear();

    let b = store.add_task_to_inbox("b", Priority::Low).unwrap();
    assert_eq!(
        *events.lock().unwrap(),
        vec![StoreEvent::TaskAdded {
            id: b,
            position: InsertPosition::Tail,
        }]
    );
}

#[test]
fn completing_last_inbox_task_reports_empty_focus() {
    let (mut store, events) = recording_store();
    let only = store.add_task_to_inbox("only", Priority::Low).unwrap();
    events.lock().unwrap().clear();

    store.mark_completed_by_id(only);
    assert_eq!(
        events.lock().unwrap().last(),
        Some(&StoreEvent::FocusChanged { id: None })
    );
}

#[test]
fn no_ops_do_not_notify() {
    let (mut store, events) = recording_store();
    store.add_task_to_inbox("   ", Priority::Low);
    store.mark_completed_by_id(uuid::Uuid::new_v4());

    assert!(events.lock().unwrap().is_empty());
    assert_eq!(store.revision(), 0);
}

#[test]
fn unsubscribe_stops_delivery() {
    let mut store = TaskStore::new();
    let count = Arc::new(Mutex::new(0_usize));
    let sink = Arc::clone(&count);
    let subscription = store.subscribe(move |_| *sink.lock().unwrap() += 1);
    assert_eq!(store.listener_count(), 1);

    store.add_task_to_inbox("a", Priority::Low);
    let seen = *count.lock().unwrap();
    assert!(store.unsubscribe(subscription));
    assert!(!store.unsubscribe(subscription));
    store.add_task_to_inbox("b", Priority::Low);

    assert_eq!(*count.lock().unwrap(), seen);
    assert_eq!(store.listener_count(), 0);
}
