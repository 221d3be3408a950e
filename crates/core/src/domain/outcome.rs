// Invocation Outcome Model
// The tool's process-exit request is data here, not control flow.

use serde::{Deserialize, Serialize};

use crate::domain::CapturedOutput;

/// How the tool's entry point ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Termination {
    /// The entry point returned normally.
    Completed,
    /// The entry point asked to end the whole process with this status
    /// code; the adapter intercepted the request.
    RequestedExit(i32),
}

impl std::fmt::Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Termination::Completed => write!(f, "COMPLETED"),
            Termination::RequestedExit(code) => write!(f, "EXIT({})", code),
        }
    }
}

/// Full result of one invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub output: CapturedOutput,
    pub termination: Termination,
    pub duration_ms: i64,
}

impl RunReport {
    /// The string contract of `run`: captured stdout followed by stderr.
    pub fn combined_output(&self) -> String {
        self.output.combined()
    }
}
