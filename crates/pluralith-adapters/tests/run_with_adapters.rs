//! End-to-end runs through `RunService` wired with the real adapters.

use std::path::PathBuf;

use pluralith_adapters::{LocalProcessExecutor, PathLocator, ScriptedExecutor, StaticLocator};
use pluralith_core::{domain::Stage, prelude::*};

fn scripted_service(executor: &ScriptedExecutor) -> RunService {
    let locator = StaticLocator::new()
        .with(Tool::Pluralith, "/opt/bin/pluralith")
        .with(Tool::Terraform, "/opt/bin/terraform");
    RunService::new(Box::new(executor.clone()), Box::new(locator))
}

#[test]
fn terraform_init_runs_first_with_backend_config() {
    let executor = ScriptedExecutor::new();
    executor
        .push(ProcessOutput::new(0, "Terraform initialized", ""))
        .unwrap()
        .push(ProcessOutput::new(0, "Plan rendered", ""))
        .unwrap();

    let params = RunParams {
        init_terraform: Some(true),
        backend_config: Some(KeyValues::from_iter([("bucket", "state")])),
        backend_config_files: Some(vec![PathBuf::from("backend.hcl")]),
        ..RunParams::new("plan", "/srv/infra")
    };

    let report = scripted_service(&executor)
        .run(params, RunOptions::default())
        .unwrap();

    let calls = executor.invocations();
    assert_eq!(calls.len(), 2);
    assert_eq!(
        calls[0].spec.command_line(),
        "/opt/bin/terraform init --backend-config=bucket=state --backend-config=backend.hcl"
    );
    assert_eq!(calls[1].spec.command_line(), "/opt/bin/pluralith plan");
    assert!(calls.iter().all(|c| c.working_dir == PathBuf::from("/srv/infra")));

    assert!(!report.changed);
    assert_eq!(report.output(Stage::TerraformInit), Some("Terraform initialized"));
    assert_eq!(report.output(Stage::Pluralith), Some("Plan rendered"));
}

#[test]
fn check_mode_spawns_nothing() {
    let executor = ScriptedExecutor::new();
    let params = RunParams {
        api_key: Some("SECRET".into()),
        init_terraform: Some(true),
        ..RunParams::new("init", "/srv/infra")
    };

    let report = scripted_service(&executor)
        .run(params, RunOptions { check_mode: true })
        .unwrap();

    assert!(executor.invocations().is_empty());
    assert!(!report.changed);
    assert_eq!(
        report.state.get("pluralith_planned"),
        Some("/opt/bin/pluralith init --api-key=***")
    );
    assert_eq!(
        report.state.get("terraform_init_planned"),
        Some("/opt/bin/terraform init")
    );
}

#[test]
fn unsupported_command_never_reaches_terraform() {
    let executor = ScriptedExecutor::new();
    executor.push_exit(0).unwrap();
    let params = RunParams {
        init_terraform: Some(true),
        ..RunParams::new("deploy", "/srv/infra")
    };

    let err = scripted_service(&executor)
        .run(params, RunOptions::default())
        .unwrap_err();

    assert!(err.to_string().contains("deploy"));
    assert!(executor.invocations().is_empty());
    assert_eq!(executor.pending(), 1);
}

#[cfg(unix)]
mod real_processes {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    /// Install a fake tool that logs its argv and exits with `code`.
    fn fake_tool(dir: &TempDir, name: &str, stdout: &str, code: i32) -> PathBuf {
        let path = dir.path().join(name);
        let script = format!(
            "#!/bin/sh\necho \"{name} $*\" >> calls.log\nprintf '%s' '{stdout}'\nexit {code}\n"
        );
        std::fs::write(&path, script).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path
    }

    #[test]
    fn located_tools_run_in_project_directory() {
        let bin = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        fake_tool(&bin, "terraform", "tf ok", 0);
        fake_tool(&bin, "pluralith", "graph exported", 2);

        let service = RunService::new(
            Box::new(LocalProcessExecutor::new()),
            Box::new(PathLocator::with_search_path(bin.path())),
        );
        let params = RunParams {
            init_terraform: Some(true),
            variables: Some(KeyValues::from_iter([("env", "dev")])),
            ..RunParams::new("graph", project.path())
        };

        let report = service.run(params, RunOptions::default()).unwrap();

        assert!(report.changed);
        assert_eq!(report.output(Stage::Pluralith), Some("graph exported"));

        let log = std::fs::read_to_string(project.path().join("calls.log")).unwrap();
        let lines: Vec<_> = log.lines().collect();
        assert_eq!(lines, vec!["terraform init", "pluralith graph --var=\"env=dev\""]);
    }

    #[test]
    fn fatal_exit_surfaces_both_streams() {
        let bin = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        let pluralith = fake_tool(&bin, "pluralith", "partial", 1);

        let service = RunService::new(
            Box::new(LocalProcessExecutor::new()),
            Box::new(StaticLocator::new()),
        );
        let params = RunParams {
            binary_path: Some(pluralith),
            ..RunParams::new("plan", project.path())
        };

        let err = service.run(params, RunOptions::default()).unwrap_err();
        assert!(err.is_tool_failure());
        assert!(err.to_string().contains("exit code 1"));
        assert!(err.to_string().contains("STDOUT: partial"));
    }
}
