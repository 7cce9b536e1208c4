use serde::{Deserialize, Serialize};

use crate::domain::{classifier::Classification, value_objects::Stage};

/// What the process executor hands back: exit code plus captured text.
///
/// A child terminated without an exit code (killed by a signal) is reported
/// with `exit_code == -1`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn new(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }
}

/// The classified result of one stage. Created once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageOutcome {
    pub stage: Stage,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub classification: Classification,
}

impl StageOutcome {
    pub fn from_output(stage: Stage, output: ProcessOutput) -> Self {
        Self {
            stage,
            classification: Classification::from_exit_code(output.exit_code),
            exit_code: output.exit_code,
            stdout: output.stdout,
            stderr: output.stderr,
        }
    }
}
