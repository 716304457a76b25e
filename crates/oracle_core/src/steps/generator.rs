//! Step generator contract and the built-in placeholder.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure reported by a step generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepGenerationError {
    /// The backing service or model is not reachable.
    Unavailable(String),
    /// The generator finished without any usable step.
    EmptyResult,
    /// Any other failure, with a message suitable for the user.
    Failed(String),
}

impl StepGenerationError {
    /// Message shown in the dismissible error banner.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

impl Display for StepGenerationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(details) => write!(f, "step generator unavailable: {details}"),
            Self::EmptyResult => write!(f, "no starter steps were suggested"),
            Self::Failed(details) => write!(f, "{details}"),
        }
    }
}

impl Error for StepGenerationError {}

/// Produces short, ordered starter steps for a task title.
///
/// Implementations may block; callers run them on a worker thread via
/// `spawn_generation`.
pub trait StepGenerator: Send + Sync {
    fn generate_steps(&self, task_title: &str) -> Result<Vec<String>, StepGenerationError>;
}

const PLACEHOLDER_STEPS: &[&str] = &[
    "Open Notes or your doc template",
    "Jot down 3 wins from this week",
    "List one thing that still feels stuck",
];

/// Returns a fixed list of steps regardless of title.
#[derive(Debug, Clone)]
pub struct StaticStepGenerator {
    steps: Vec<String>,
}

impl StaticStepGenerator {
    pub fn new<I, S>(steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            steps: steps.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for StaticStepGenerator {
    fn default() -> Self {
        Self::new(PLACEHOLDER_STEPS.iter().copied())
    }
}

impl StepGenerator for StaticStepGenerator {
    fn generate_steps(&self, _task_title: &str) -> Result<Vec<String>, StepGenerationError> {
        if self.steps.is_empty() {
            return Err(StepGenerationError::EmptyResult);
        }
        Ok(self.steps.clone())
    }
}
