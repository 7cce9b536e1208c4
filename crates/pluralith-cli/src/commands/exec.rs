//! `pluralith-run exec`: build the request and hand it to the run service.

use std::path::Path;

use pluralith_adapters::{LocalProcessExecutor, PathLocator};
use pluralith_core::prelude::*;
use tracing::{debug, info, instrument};

use crate::{
    cli::ExecArgs,
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

/// Execute the `exec` command.
#[instrument(skip_all, fields(command = args.command.as_deref().unwrap_or("")))]
pub fn execute(args: ExecArgs, config: AppConfig, output: &OutputManager) -> CliResult<()> {
    let check_mode = args.check;
    let params = resolve_params(args, &config)?;
    debug!(
        command = ?params.command,
        project = ?params.project_path,
        init_terraform = ?params.init_terraform,
        "Resolved parameters"
    );

    let service = RunService::new(
        Box::new(LocalProcessExecutor::new()),
        Box::new(PathLocator::new()),
    );

    let label = params.command.clone().unwrap_or_default();
    let spinner = output.spinner(&format!("Running pluralith {label}"));
    let result = service.run(params, RunOptions { check_mode });
    spinner.finish_and_clear();

    let report = result?;
    info!(changed = report.changed, "Report ready");

    if check_mode && !output.is_json() {
        output.info("Check mode: nothing was executed")?;
    }
    output.report(&report)?;
    Ok(())
}

/// Layer the request sources: flags, then the args file, then config
/// defaults.
pub fn resolve_params(args: ExecArgs, config: &AppConfig) -> CliResult<RunParams> {
    let from_file = match &args.args_file {
        Some(path) => read_args_file(path)?,
        None => RunParams::default(),
    };

    Ok(flags_to_params(args).or(from_file).or(config.as_params()))
}

fn read_args_file(path: &Path) -> CliResult<RunParams> {
    let raw = std::fs::read_to_string(path)
        .with_cli_context(|| format!("reading args file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_cli_context(|| format!("parsing args file {}", path.display()))
}

/// Only flags the user actually passed become `Some`; everything else is
/// left for the lower layers.
fn flags_to_params(args: ExecArgs) -> RunParams {
    RunParams {
        command: args.command,
        binary_path: args.binary_path,
        terraform_binary_path: args.terraform_binary_path,
        project_path: args.project_path,
        api_key: args.api_key,
        project_id: args.project_id,
        variables: non_empty(args.variables).map(KeyValues::from_iter),
        variable_files: non_empty(args.variable_files),
        backend_config: non_empty(args.backend_config).map(KeyValues::from_iter),
        backend_config_files: non_empty(args.backend_config_files),
        init_terraform: args.init_terraform.then_some(true),
    }
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    (!items.is_empty()).then_some(items)
}
