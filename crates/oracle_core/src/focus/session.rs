//! Focus session: store plus starter-step state.

use crate::model::task::TaskId;
use crate::steps::generator::{StepGenerationError, StepGenerator};
use crate::steps::pending::{spawn_generation, PendingSteps, StepsOutcome};
use crate::store::task_store::TaskStore;
use log::{debug, info};
use std::sync::Arc;

/// Maximum number of starter steps kept per focus task.
pub const MAX_STARTER_STEPS: usize = 3;

/// Starter steps attached to one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusSteps {
    pub task_id: TaskId,
    pub steps: Vec<String>,
}

/// What `apply_steps` did with an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepsApplied {
    Stored,
    Failed,
    /// The outcome belonged to a task that is no longer the focus.
    Discarded,
}

/// Owns the session store and the focus zone state around it.
#[derive(Debug, Default)]
pub struct FocusSession {
    store: TaskStore,
    steps: Option<FocusSteps>,
    last_error: Option<String>,
}

impl FocusSession {
    pub fn new(store: TaskStore) -> Self {
        Self {
            store,
            steps: None,
            last_error: None,
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut TaskStore {
        &mut self.store
    }

    /// Steps for the current focus task, if any were generated for it.
    pub fn steps_for_focus(&self) -> Option<&[String]> {
        let focus_id = self.store.focus_task()?.id;
        self.steps
            .as_ref()
            .filter(|steps| steps.task_id == focus_id)
            .map(|steps| steps.steps.as_slice())
    }

    /// Dismissible message from the last failed generation.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    /// Starts generation for the current focus task.
    ///
    /// Returns `None` when the inbox is empty.
    pub fn request_steps(&self, generator: Arc<dyn StepGenerator>) -> Option<PendingSteps> {
        let focus = self.store.focus_task()?;
        debug!("event=steps_request module=focus status=ok");
        Some(spawn_generation(generator, focus.id, focus.title))
    }

    /// Applies a finished generation on the owning thread.
    pub fn apply_steps(&mut self, outcome: StepsOutcome) -> StepsApplied {
        let is_focus = self
            .store
            .focus_task()
            .is_some_and(|focus| focus.id == outcome.task_id);
        if !is_focus {
            debug!("event=steps_apply module=focus status=skipped reason=stale_focus");
            return StepsApplied::Discarded;
        }

        match outcome.result.and_then(normalize_steps) {
            Ok(steps) => {
                info!(
                    "event=steps_apply module=focus status=ok count={}",
                    steps.len()
                );
                self.steps = Some(FocusSteps {
                    task_id: outcome.task_id,
                    steps,
                });
                self.last_error = None;
                StepsApplied::Stored
            }
            Err(err) => {
                info!("event=steps_apply module=focus status=error");
                self.last_error = Some(err.user_message());
                StepsApplied::Failed
            }
        }
    }
}

fn normalize_steps(raw: Vec<String>) -> Result<Vec<String>, StepGenerationError> {
    let steps: Vec<String> = raw
        .into_iter()
        .map(|step| step.trim().to_string())
        .filter(|step| !step.is_empty())
        .take(MAX_STARTER_STEPS)
        .collect();
    if steps.is_empty() {
        return Err(StepGenerationError::EmptyResult);
    }
    Ok(steps)
}
