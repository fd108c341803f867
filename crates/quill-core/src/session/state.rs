//! Processing lifecycle of a session.

use serde::Serialize;

use crate::models::FileHandle;

/// Progress shown while the backend has not answered yet.
pub const PROGRESS_CEILING: u8 = 99;

/// Where a session stands with respect to its processing step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ProcessingState {
    #[default]
    Idle,
    Running {
        progress: u8,
    },
    Succeeded {
        output: FileHandle,
    },
    Failed {
        message: String,
    },
}

impl ProcessingState {
    pub fn is_running(&self) -> bool {
        matches!(self, ProcessingState::Running { .. })
    }

    /// Current percentage; 100 once succeeded, 0 otherwise.
    pub fn progress(&self) -> u8 {
        match self {
            ProcessingState::Running { progress } => *progress,
            ProcessingState::Succeeded { .. } => 100,
            ProcessingState::Idle | ProcessingState::Failed { .. } => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingState::Idle => "idle",
            ProcessingState::Running { .. } => "running",
            ProcessingState::Succeeded { .. } => "succeeded",
            ProcessingState::Failed { .. } => "failed",
        }
    }
}
