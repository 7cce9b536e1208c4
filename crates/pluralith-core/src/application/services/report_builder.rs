//! Report Builder - folds stage outcomes into one [`RunReport`].

use crate::domain::{ExecutableSpec, KeyValues, RunReport, StageOutcome};

/// Accumulates the report for a single invocation.
///
/// `original_message` and `message` are set *optimistically* in
/// [`ReportBuilder::new`], before any stage has run. A caller that inspects
/// a half-built report after a crash will therefore read "completed" even
/// though nothing finished. On a fatal stage the builder is dropped and the
/// caller receives the error instead, so a finished report is always truthful.
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    report: RunReport,
}

impl ReportBuilder {
    pub fn new(command: &str) -> Self {
        Self {
            report: RunReport {
                changed: false,
                original_message: format!("starting {command}"),
                message: format!("{command} completed"),
                command: command.to_string(),
                state: KeyValues::new(),
            },
        }
    }

    /// Fold an ordered sequence of outcomes in one go.
    pub fn aggregate<'a>(
        command: &str,
        outcomes: impl IntoIterator<Item = &'a StageOutcome>,
    ) -> RunReport {
        let mut builder = Self::new(command);
        for outcome in outcomes {
            builder.record(outcome);
        }
        builder.finish()
    }

    /// Attach a context entry (binary path, project path) to `state`.
    pub fn context(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        self.report.state.insert(key, value);
        self
    }

    /// Record a non-fatal stage: its stdout verbatim, and whether it changed
    /// anything. stderr is deliberately not kept.
    pub fn record(&mut self, outcome: &StageOutcome) -> &mut Self {
        self.report
            .state
            .insert(outcome.stage.output_key(), outcome.stdout.clone());
        self.report.changed |= outcome.classification.is_changed();
        self
    }

    /// Record a stage that check mode built but did not run.
    pub fn planned(&mut self, stage: crate::domain::Stage, spec: &ExecutableSpec) -> &mut Self {
        self.report
            .state
            .insert(stage.planned_key(), spec.command_line());
        self
    }

    pub fn finish(self) -> RunReport {
        self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ProcessOutput, Stage};

    fn outcome(stage: Stage, code: i32, stdout: &str) -> StageOutcome {
        StageOutcome::from_output(stage, ProcessOutput::new(code, stdout, "noise on stderr"))
    }

    #[test]
    fn messages_are_set_up_front() {
        let report = ReportBuilder::new("run").finish();
        assert_eq!(report.original_message, "starting run");
        assert_eq!(report.message, "run completed");
        assert_eq!(report.command, "run");
        assert!(!report.changed);
        assert!(report.state.is_empty());
    }

    #[test]
    fn changed_if_any_stage_changed() {
        let report = ReportBuilder::aggregate(
            "run",
            &[
                outcome(Stage::TerraformInit, 0, "tf"),
                outcome(Stage::Pluralith, 2, "diagram"),
            ],
        );
        assert!(report.changed);
    }

    #[test]
    fn unchanged_when_all_stages_unchanged() {
        let report = ReportBuilder::aggregate(
            "run",
            &[
                outcome(Stage::TerraformInit, 0, "tf"),
                outcome(Stage::Pluralith, 0, "diagram"),
            ],
        );
        assert!(!report.changed);
    }

    #[test]
    fn stdout_is_kept_per_stage_in_order_and_stderr_dropped() {
        let report = ReportBuilder::aggregate(
            "run",
            &[
                outcome(Stage::TerraformInit, 0, "tf out"),
                outcome(Stage::Pluralith, 0, "diagram out"),
            ],
        );
        assert_eq!(
            report.state.keys().collect::<Vec<_>>(),
            vec!["terraform_init_output", "pluralith_output"]
        );
        assert_eq!(report.output(Stage::Pluralith), Some("diagram out"));
        assert!(!report.state.iter().any(|(_, v)| v.contains("stderr")));
    }

    #[test]
    fn planned_stage_uses_masked_command_line() {
        let spec = ExecutableSpec::new(
            "pluralith",
            vec!["init".into(), "--api-key=SECRET".into()],
        );
        let mut builder = ReportBuilder::new("init");
        builder.planned(Stage::Pluralith, &spec);
        let report = builder.finish();
        assert_eq!(
            report.state.get("pluralith_planned"),
            Some("pluralith init --api-key=***")
        );
    }
}
