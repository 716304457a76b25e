//! Worker-thread bridge for step generation.

use crate::model::task::TaskId;
use crate::steps::generator::{StepGenerationError, StepGenerator};
use log::{info, warn};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

/// Finished generation for one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepsOutcome {
    pub task_id: TaskId,
    pub result: Result<Vec<String>, StepGenerationError>,
}

/// Handle to an in-flight generation.
#[derive(Debug)]
pub struct PendingSteps {
    task_id: TaskId,
    receiver: Receiver<StepsOutcome>,
}

impl PendingSteps {
    pub fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the outcome if the worker has finished, without blocking.
    ///
    /// A worker that stopped without reporting yields a `Failed` outcome.
    pub fn try_take(&self) -> Option<StepsOutcome> {
        match self.receiver.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(self.worker_lost()),
        }
    }

    /// Blocks until the worker reports.
    pub fn wait(self) -> StepsOutcome {
        self.receiver
            .recv()
            .unwrap_or_else(|_| self.worker_lost())
    }

    fn worker_lost(&self) -> StepsOutcome {
        StepsOutcome {
            task_id: self.task_id,
            result: Err(StepGenerationError::Failed(
                "step generation stopped unexpectedly".to_string(),
            )),
        }
    }
}

/// Runs `generator` for `title` on a new worker thread.
pub fn spawn_generation(
    generator: Arc<dyn StepGenerator>,
    task_id: TaskId,
    title: String,
) -> PendingSteps {
    let (sender, receiver) = mpsc::channel();
    let spawned = thread::Builder::new()
        .name("oracle-steps".to_string())
        .spawn(move || {
            let result = generator.generate_steps(&title);
            match &result {
                Ok(steps) => info!(
                    "event=steps_generate module=steps status=ok count={}",
                    steps.len()
                ),
                Err(err) => warn!("event=steps_generate module=steps status=error error={err}"),
            }
            // Receiver may be gone if the caller dropped the handle.
            let _ = sender.send(StepsOutcome { task_id, result });
        });

    if let Err(err) = spawned {
        warn!("event=steps_spawn module=steps status=error error={err}");
    }

    PendingSteps { task_id, receiver }
}
