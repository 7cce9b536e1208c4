use serde::Serialize;

use crate::domain::value_objects::KeyValues;

/// The single record handed back to the orchestration caller.
///
/// `state` is ordered: context entries first, then one entry per executed
/// (or, in check mode, planned) stage in execution order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// `true` iff at least one stage exited with code 2.
    pub changed: bool,
    pub original_message: String,
    pub message: String,
    /// The Pluralith subcommand, echoed back.
    pub command: String,
    pub state: KeyValues,
}

impl RunReport {
    /// Captured stdout of a stage, if it ran.
    pub fn output(&self, stage: crate::domain::Stage) -> Option<&str> {
        self.state.get(stage.output_key())
    }
}
