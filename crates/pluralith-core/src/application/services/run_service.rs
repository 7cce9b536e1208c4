//! Run Service - main application orchestrator.
//!
//! This service drives one invocation end to end:
//! 1. Normalize parameters and resolve binaries (no process yet)
//! 2. Optionally build and run `terraform init`; stop on a fatal exit
//! 3. Build and run the Pluralith subcommand; stop on a fatal exit
//! 4. Fold the outcomes into a [`RunReport`]
//!
//! ```text
//!  Start ──(init_terraform)──▶ ProvisioningRunning ──▶ ProvisioningDone ─┐
//!    │                               │ fatal                             │
//!    │                               ▼                                   ▼
//!    └──────────────────────────▶ Failed ◀── fatal ── MainRunning ──▶ Done
//! ```
//!
//! Everything is synchronous: each stage blocks until its process exits.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError, ReportBuilder,
        ports::{BinaryLocator, ProcessExecutor},
    },
    domain::{
        CommandBuilder, ExecutableSpec, RunConfig, RunParams, RunReport, Stage, StageOutcome,
        TerraformCommand, Tool,
    },
    error::PluralithResult,
};

/// Caller-controlled switches that are not part of the request itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Validate, resolve and build every stage, but spawn nothing.
    pub check_mode: bool,
}

/// Orchestration state, logged on every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Start,
    ProvisioningRunning,
    ProvisioningDone,
    MainRunning,
    Done,
    Failed,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::ProvisioningRunning => "provisioning-running",
            Self::ProvisioningDone => "provisioning-done",
            Self::MainRunning => "main-running",
            Self::Done => "done",
            Self::Failed => "failed",
        })
    }
}

/// Binaries resolved for one invocation.
#[derive(Debug)]
struct Binaries {
    pluralith: PathBuf,
    terraform: Option<PathBuf>,
}

/// Main orchestration service.
pub struct RunService {
    executor: Box<dyn ProcessExecutor>,
    locator: Box<dyn BinaryLocator>,
}

impl RunService {
    /// Create a new run service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use pluralith_core::application::{RunService, ports::*};
    ///
    /// let service = RunService::new(
    ///     executor, // impl ProcessExecutor
    ///     locator,  // impl BinaryLocator
    /// );
    /// ```
    pub fn new(executor: Box<dyn ProcessExecutor>, locator: Box<dyn BinaryLocator>) -> Self {
        Self { executor, locator }
    }

    /// Normalize `params` and run them.
    pub fn run(&self, params: RunParams, options: RunOptions) -> PluralithResult<RunReport> {
        let config = params.normalize()?;
        self.execute(&config, options)
    }

    /// Run an already-normalized configuration.
    #[instrument(
        skip_all,
        fields(
            run_id = %Uuid::new_v4(),
            command = %config.command,
            project = %config.project_path.display(),
            check_mode = options.check_mode
        )
    )]
    pub fn execute(&self, config: &RunConfig, options: RunOptions) -> PluralithResult<RunReport> {
        // Reject an unknown subcommand before terraform gets a chance to run.
        let command = CommandBuilder::ensure_supported(Tool::Pluralith, &config.command)?;

        let binaries = self.resolve_binaries(config)?;

        let mut report = ReportBuilder::new(command);
        report
            .context(command, "true")
            .context("bin_path", binaries.pluralith.display().to_string())
            .context("project_path", config.project_path.display().to_string());

        let mut state = RunState::Start;
        let result = self.drive(config, command, &binaries, options, &mut report, &mut state);

        match result {
            Ok(()) => {
                transition(&mut state, RunState::Done);
                let report = report.finish();
                info!(changed = report.changed, "Run completed");
                Ok(report)
            }
            Err(e) => {
                transition(&mut state, RunState::Failed);
                Err(e)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn drive(
        &self,
        config: &RunConfig,
        command: &str,
        binaries: &Binaries,
        options: RunOptions,
        report: &mut ReportBuilder,
        state: &mut RunState,
    ) -> PluralithResult<()> {
        if let Some(terraform) = binaries.terraform.as_deref() {
            let spec = CommandBuilder::build(
                terraform,
                Tool::Terraform,
                TerraformCommand::Init.as_str(),
                config,
            )?;

            if options.check_mode {
                report.planned(Stage::TerraformInit, &spec);
            } else {
                transition(state, RunState::ProvisioningRunning);
                let outcome = self.run_stage(Stage::TerraformInit, &spec, &config.project_path)?;
                report.record(&outcome);
                transition(state, RunState::ProvisioningDone);
            }
        }

        let spec = CommandBuilder::build(
            &binaries.pluralith,
            Tool::Pluralith,
            command,
            config,
        )?;

        if options.check_mode {
            report.planned(Stage::Pluralith, &spec);
            info!("Check mode: no process spawned");
            return Ok(());
        }

        transition(state, RunState::MainRunning);
        let outcome = self.run_stage(Stage::Pluralith, &spec, &config.project_path)?;
        report.record(&outcome);
        Ok(())
    }

    /// Run one stage and turn a fatal classification into an error.
    fn run_stage(
        &self,
        stage: Stage,
        spec: &ExecutableSpec,
        working_dir: &Path,
    ) -> PluralithResult<StageOutcome> {
        info!(%stage, command = %spec, "Running stage");

        let output = self.executor.execute(spec, working_dir)?;
        let outcome = StageOutcome::from_output(stage, output);

        if outcome.classification.is_fatal() {
            warn!(%stage, exit_code = outcome.exit_code, "Stage failed");
            return Err(ApplicationError::ToolFailed {
                stage,
                exit_code: outcome.exit_code,
                stdout: outcome.stdout,
                stderr: outcome.stderr,
            }
            .into());
        }

        info!(
            %stage,
            exit_code = outcome.exit_code,
            classification = %outcome.classification,
            "Stage finished"
        );
        Ok(outcome)
    }

    /// Resolve every binary this run needs, before anything is spawned.
    fn resolve_binaries(&self, config: &RunConfig) -> PluralithResult<Binaries> {
        let pluralith = self.resolve(config.binary_path.as_deref(), Tool::Pluralith)?;
        let terraform = if config.init_terraform {
            Some(self.resolve(config.terraform_binary_path.as_deref(), Tool::Terraform)?)
        } else {
            None
        };
        Ok(Binaries {
            pluralith,
            terraform,
        })
    }

    fn resolve(&self, override_path: Option<&Path>, tool: Tool) -> PluralithResult<PathBuf> {
        match override_path {
            Some(path) => {
                debug!(%tool, path = %path.display(), "Using binary override");
                Ok(path.to_path_buf())
            }
            None => {
                let path = self.locator.locate(tool)?;
                debug!(%tool, path = %path.display(), "Located binary");
                Ok(path)
            }
        }
    }
}

fn transition(state: &mut RunState, next: RunState) {
    debug!(from = %state, to = %next, "State transition");
    *state = next;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::output::{MockBinaryLocator, MockProcessExecutor};
    use crate::domain::{DomainError, KeyValues, ProcessOutput};
    use crate::error::PluralithError;
    use mockall::{Sequence, predicate::eq};

    fn locator() -> MockBinaryLocator {
        let mut locator = MockBinaryLocator::new();
        locator
            .expect_locate()
            .returning(|tool| Ok(PathBuf::from(format!("/usr/bin/{}", tool.binary_name()))));
        locator
    }

    fn service(executor: MockProcessExecutor, locator: MockBinaryLocator) -> RunService {
        RunService::new(Box::new(executor), Box::new(locator))
    }

    fn is_pluralith(spec: &ExecutableSpec) -> bool {
        spec.program() == Path::new("/usr/bin/pluralith")
    }

    fn is_terraform(spec: &ExecutableSpec) -> bool {
        spec.program() == Path::new("/usr/bin/terraform")
    }

    #[test]
    fn init_runs_pluralith_with_credentials_in_project_dir() {
        let mut executor = MockProcessExecutor::new();
        executor
            .expect_execute()
            .withf(|spec, dir| {
                is_pluralith(spec)
                    && spec.args() == ["init", "--api-key=ABC", "--project-id=P1"]
                    && dir == Path::new("/tmp/proj")
            })
            .times(1)
            .returning(|_, _| Ok(ProcessOutput::new(0, "initialized", "")));

        let params = RunParams {
            api_key: Some("ABC".into()),
            project_id: Some("P1".into()),
            ..RunParams::new("init", "/tmp/proj")
        };
        let report = service(executor, locator())
            .run(params, RunOptions::default())
            .unwrap();

        assert!(!report.changed);
        assert_eq!(report.output(Stage::Pluralith), Some("initialized"));
    }

    #[test]
    fn run_passes_variables() {
        let mut executor = MockProcessExecutor::new();
        executor
            .expect_execute()
            .withf(|spec, _| {
                spec.args() == ["run", "--var=\"region=us-east-1\"", "--var-file=vars.tfvars"]
            })
            .times(1)
            .returning(|_, _| Ok(ProcessOutput::new(0, "", "")));

        let params = RunParams {
            variables: Some(KeyValues::from_iter([("region", "us-east-1")])),
            variable_files: Some(vec![PathBuf::from("vars.tfvars")]),
            ..RunParams::new("run", "/tmp/proj")
        };
        service(executor, locator())
            .run(params, RunOptions::default())
            .unwrap();
    }

    #[test]
    fn terraform_runs_before_pluralith() {
        let mut seq = Sequence::new();
        let mut executor = MockProcessExecutor::new();
        executor
            .expect_execute()
            .withf(|spec, _| is_terraform(spec) && spec.args() == ["init"])
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(ProcessOutput::new(0, "tf ready", "")));
        executor
            .expect_execute()
            .withf(|spec, _| is_pluralith(spec))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(ProcessOutput::new(2, "diagram", "")));

        let params = RunParams {
            init_terraform: Some(true),
            ..RunParams::new("run", "/tmp/proj")
        };
        let report = service(executor, locator())
            .run(params, RunOptions::default())
            .unwrap();

        assert!(report.changed);
        assert_eq!(report.output(Stage::TerraformInit), Some("tf ready"));
        assert_eq!(report.output(Stage::Pluralith), Some("diagram"));
    }

    #[test]
    fn fatal_terraform_stops_the_sequence() {
        let mut executor = MockProcessExecutor::new();
        executor
            .expect_execute()
            .withf(|spec, _| is_terraform(spec))
            .times(1)
            .returning(|_, _| Ok(ProcessOutput::new(1, "tf out", "tf err")));
        executor
            .expect_execute()
            .withf(|spec, _| is_pluralith(spec))
            .times(0);

        let params = RunParams {
            init_terraform: Some(true),
            ..RunParams::new("run", "/tmp/proj")
        };
        let err = service(executor, locator())
            .run(params, RunOptions::default())
            .unwrap_err();

        match &err {
            PluralithError::Application(ApplicationError::ToolFailed {
                stage,
                exit_code,
                stdout,
                stderr,
            }) => {
                assert_eq!(*stage, Stage::TerraformInit);
                assert_eq!(*exit_code, 1);
                assert_eq!(stdout, "tf out");
                assert_eq!(stderr, "tf err");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        let message = err.to_string();
        assert!(message.contains("tf out"));
        assert!(message.contains("tf err"));
    }

    #[test]
    fn fatal_terraform_never_builds_main_stage() {
        // An unsafe variable would fail the pluralith build; the terraform
        // failure must surface instead because the build never happens.
        let mut executor = MockProcessExecutor::new();
        executor
            .expect_execute()
            .times(1)
            .returning(|_, _| Ok(ProcessOutput::new(1, "", "")));

        let params = RunParams {
            init_terraform: Some(true),
            variables: Some(KeyValues::from_iter([("bad", "a\"b")])),
            ..RunParams::new("run", "/tmp/proj")
        };
        let err = service(executor, locator())
            .run(params, RunOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            PluralithError::Application(ApplicationError::ToolFailed {
                stage: Stage::TerraformInit,
                ..
            })
        ));
    }

    #[test]
    fn terraform_not_invoked_when_disabled() {
        let mut locator = MockBinaryLocator::new();
        locator
            .expect_locate()
            .with(eq(Tool::Pluralith))
            .times(1)
            .returning(|_| Ok(PathBuf::from("/usr/bin/pluralith")));
        locator.expect_locate().with(eq(Tool::Terraform)).times(0);

        let mut executor = MockProcessExecutor::new();
        executor
            .expect_execute()
            .withf(|spec, _| is_pluralith(spec))
            .times(1)
            .returning(|_, _| Ok(ProcessOutput::new(0, "ok", "")));

        let report = service(executor, locator)
            .run(RunParams::new("run", "/tmp/proj"), RunOptions::default())
            .unwrap();

        assert!(report.output(Stage::TerraformInit).is_none());
        assert!(!report.state.contains_key("terraform_init_output"));
    }

    #[test]
    fn changed_exit_code_is_not_an_error() {
        let mut executor = MockProcessExecutor::new();
        executor
            .expect_execute()
            .returning(|_, _| Ok(ProcessOutput::new(2, "changed", "")));

        let report = service(executor, locator())
            .run(RunParams::new("run", "/tmp/proj"), RunOptions::default())
            .unwrap();
        assert!(report.changed);
        assert_eq!(report.message, "run completed");
    }

    #[test]
    fn unknown_exit_code_is_fatal_with_raw_code() {
        let mut executor = MockProcessExecutor::new();
        executor
            .expect_execute()
            .returning(|_, _| Ok(ProcessOutput::new(137, "", "killed")));

        let err = service(executor, locator())
            .run(RunParams::new("run", "/tmp/proj"), RunOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            PluralithError::Application(ApplicationError::ToolFailed { exit_code: 137, .. })
        ));
    }

    #[test]
    fn binary_override_skips_locator() {
        let mut locator = MockBinaryLocator::new();
        locator.expect_locate().times(0);

        let mut executor = MockProcessExecutor::new();
        executor
            .expect_execute()
            .withf(|spec, _| spec.program() == Path::new("/opt/pluralith"))
            .times(1)
            .returning(|_, _| Ok(ProcessOutput::new(0, "", "")));

        let params = RunParams {
            binary_path: Some("/opt/pluralith".into()),
            ..RunParams::new("run", "/tmp/proj")
        };
        let report = service(executor, locator)
            .run(params, RunOptions::default())
            .unwrap();
        assert_eq!(report.state.get("bin_path"), Some("/opt/pluralith"));
        assert_eq!(report.state.get("run"), Some("true"));
    }

    #[test]
    fn report_uses_canonical_command_name() {
        let mut locator = MockBinaryLocator::new();
        locator
            .expect_locate()
            .returning(|tool| Ok(PathBuf::from(tool.binary_name())));
        let mut executor = MockProcessExecutor::new();
        executor
            .expect_execute()
            .withf(|spec, _| spec.args().first().map(String::as_str) == Some("run"))
            .times(1)
            .returning(|_, _| Ok(ProcessOutput::new(0, "", "")));

        let report = service(executor, locator)
            .run(RunParams::new(" Run ", "/tmp/proj"), RunOptions::default())
            .unwrap();
        assert_eq!(report.command, "run");
        assert_eq!(report.message, "run completed");
        assert_eq!(report.state.get("run"), Some("true"));
        assert!(!report.state.contains_key("Run"));
    }

    #[test]
    fn missing_binary_fails_before_any_spawn() {
        let mut locator = MockBinaryLocator::new();
        locator.expect_locate().returning(|tool| {
            Err(ApplicationError::BinaryNotFound {
                tool,
                reason: "not on PATH".into(),
            }
            .into())
        });
        let mut executor = MockProcessExecutor::new();
        executor.expect_execute().times(0);

        let err = service(executor, locator)
            .run(RunParams::new("run", "/tmp/proj"), RunOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            PluralithError::Application(ApplicationError::BinaryNotFound { .. })
        ));
    }

    #[test]
    fn missing_terraform_fails_before_any_spawn() {
        let mut locator = MockBinaryLocator::new();
        locator
            .expect_locate()
            .with(eq(Tool::Pluralith))
            .returning(|_| Ok(PathBuf::from("/usr/bin/pluralith")));
        locator.expect_locate().with(eq(Tool::Terraform)).returning(|tool| {
            Err(ApplicationError::BinaryNotFound {
                tool,
                reason: "not on PATH".into(),
            }
            .into())
        });
        let mut executor = MockProcessExecutor::new();
        executor.expect_execute().times(0);

        let params = RunParams {
            init_terraform: Some(true),
            ..RunParams::new("run", "/tmp/proj")
        };
        assert!(service(executor, locator)
            .run(params, RunOptions::default())
            .is_err());
    }

    #[test]
    fn validation_error_fails_before_anything() {
        let mut locator = MockBinaryLocator::new();
        locator.expect_locate().times(0);
        let mut executor = MockProcessExecutor::new();
        executor.expect_execute().times(0);

        let params = RunParams {
            command: Some("run".into()),
            ..RunParams::default()
        };
        let err = service(executor, locator)
            .run(params, RunOptions::default())
            .unwrap_err();
        assert_eq!(
            err,
            PluralithError::Domain(DomainError::MissingRequiredField {
                field: "project_path"
            })
        );
    }

    #[test]
    fn unsupported_command_fails_before_terraform() {
        let mut executor = MockProcessExecutor::new();
        executor.expect_execute().times(0);

        let params = RunParams {
            init_terraform: Some(true),
            ..RunParams::new("deploy", "/tmp/proj")
        };
        let err = service(executor, locator())
            .run(params, RunOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            PluralithError::Domain(DomainError::UnsupportedSubcommand { .. })
        ));
    }

    #[test]
    fn check_mode_builds_but_never_spawns() {
        let mut executor = MockProcessExecutor::new();
        executor.expect_execute().times(0);

        let params = RunParams {
            init_terraform: Some(true),
            api_key: Some("SECRET".into()),
            backend_config: Some(KeyValues::from_iter([("bucket", "state")])),
            ..RunParams::new("init", "/tmp/proj")
        };
        let report = service(executor, locator())
            .run(params, RunOptions { check_mode: true })
            .unwrap();

        assert!(!report.changed);
        assert_eq!(
            report.state.get("terraform_init_planned"),
            Some("/usr/bin/terraform init --backend-config=bucket=state")
        );
        assert_eq!(
            report.state.get("pluralith_planned"),
            Some("/usr/bin/pluralith init --api-key=***")
        );
    }

    #[test]
    fn check_mode_still_surfaces_build_errors() {
        let mut executor = MockProcessExecutor::new();
        executor.expect_execute().times(0);

        let params = RunParams {
            variables: Some(KeyValues::from_iter([("k", "line\nbreak")])),
            ..RunParams::new("run", "/tmp/proj")
        };
        let err = service(executor, locator())
            .run(params, RunOptions { check_mode: true })
            .unwrap_err();
        assert!(matches!(
            err,
            PluralithError::Domain(DomainError::UnsafeFlagValue { .. })
        ));
    }

    #[test]
    fn spawn_failure_propagates() {
        let mut executor = MockProcessExecutor::new();
        executor.expect_execute().returning(|spec, _| {
            Err(ApplicationError::SpawnFailed {
                program: spec.program().to_path_buf(),
                reason: "No such file or directory".into(),
            }
            .into())
        });

        let err = service(executor, locator())
            .run(RunParams::new("run", "/tmp/proj"), RunOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            PluralithError::Application(ApplicationError::SpawnFailed { .. })
        ));
    }
}
