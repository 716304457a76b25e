use oracle_core::{
    FocusSession, Priority, StaticStepGenerator, StepGenerationError, StepGenerator, StepsApplied,
    StepsOutcome, TaskStore,
};
use std::sync::Arc;

struct Unreachable;

impl StepGenerator for Unreachable {
    fn generate_steps(&self, _task_title: &str) -> Result<Vec<String>, StepGenerationError> {
        Err(StepGenerationError::Unavailable("offline".to_string()))
    }
}

struct EchoTitle;

impl StepGenerator for EchoTitle {
    fn generate_steps(&self, task_title: &str) -> Result<Vec<String>, StepGenerationError> {
        Ok(vec![format!("start: {task_title}")])
    }
}

fn session_with(titles: &[&str]) -> FocusSession {
    let mut store = TaskStore::new();
    for title in titles {
        store.add_task_to_inbox(title, Priority::Medium);
    }
    FocusSession::new(store)
}

#[test]
fn request_steps_without_focus_returns_none() {
    let session = FocusSession::default();
    assert!(session
        .request_steps(Arc::new(StaticStepGenerator::default()))
        .is_none());
}

#[test]
fn generated_steps_attach_to_focus_task() {
    let mut session = session_with(&["Write the weekly progress report"]);
    let pending = session.request_steps(Arc::new(EchoTitle)).unwrap();
    assert_eq!(
        pending.task_id(),
        session.store().focus_task().unwrap().id
    );

    assert_eq!(session.apply_steps(pending.wait()), StepsApplied::Stored);
    assert_eq!(
        session.steps_for_focus(),
        Some(&["start: Write the weekly progress report".to_string()][..])
    );
    assert_eq!(session.last_error(), None);
}

#[test]
fn steps_are_capped_at_three() {
    let mut session = session_with(&["a"]);
    let generator = StaticStepGenerator::new(["1", "2", "3", "4", "5"]);
    let pending = session.request_steps(Arc::new(generator)).unwrap();
    session.apply_steps(pending.wait());

    assert_eq!(session.steps_for_focus().map(<[String]>::len), Some(3));
}

#[test]
fn failure_sets_dismissible_error() {
    let mut session = session_with(&["a"]);
    let pending = session.request_steps(Arc::new(Unreachable)).unwrap();

    assert_eq!(session.apply_steps(pending.wait()), StepsApplied::Failed);
    assert_eq!(
        session.last_error(),
        Some("step generator unavailable: offline")
    );
    assert_eq!(session.steps_for_focus(), None);

    session.dismiss_error();
    assert_eq!(session.last_error(), None);
}

#[test]
fn stale_outcome_is_discarded() {
    let mut session = session_with(&["a"]);
    let pending = session
        .request_steps(Arc::new(StaticStepGenerator::default()))
        .unwrap();
    session
        .store_mut()
        .add_task_and_focus("urgent thing", Priority::Urgent);

    assert_eq!(session.apply_steps(pending.wait()), StepsApplied::Discarded);
    assert_eq!(session.steps_for_focus(), None);
}

#[test]
fn steps_hide_when_focus_moves_on() {
    let mut session = session_with(&["a", "b"]);
    let focus_id = session.store().focus_task().unwrap().id;
    session.apply_steps(StepsOutcome {
        task_id: focus_id,
        result: Ok(vec!["step".to_string()]),
    });
    assert!(session.steps_for_focus().is_some());

    session.store_mut().mark_completed_by_id(focus_id);
    assert_eq!(session.steps_for_focus(), None);
}

#[test]
fn poll_until_ready() {
    let mut session = session_with(&["a"]);
    let pending = session
        .request_steps(Arc::new(StaticStepGenerator::default()))
        .unwrap();

    let outcome = loop {
        if let Some(outcome) = pending.try_take() {
            break outcome;
        }
        std::thread::yield_now();
    };
    assert_eq!(session.apply_steps(outcome), StepsApplied::Stored);
    assert_eq!(session.steps_for_focus().map(<[String]>::len), Some(3));
}
