//! `pluralith-run config`: inspect and create the configuration file.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
///
/// `path` is the file in effect: `--config` if given, else the platform
/// default.
pub fn execute(
    cmd: ConfigCommands,
    config: AppConfig,
    path: Option<PathBuf>,
    output: &OutputManager,
) -> CliResult<()> {
    let path = path.unwrap_or_else(AppConfig::config_path);

    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.print(&value)?;
        }

        ConfigCommands::List => {
            let redacted = config.redacted();
            if output.is_json() {
                output.json(&redacted)?;
            } else {
                output.header("Current Configuration:")?;
                output.print(&render_toml(&redacted)?)?;
            }
        }

        ConfigCommands::Path => {
            output.print(&path.display().to_string())?;
        }

        ConfigCommands::Init { force } => {
            write_default(&path, force)?;
            info!(path = %path.display(), "Wrote default configuration");
            output.success(&format!("Created {}", path.display()))?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    let display_path = |p: &Option<PathBuf>| {
        p.as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default()
    };

    match key {
        "binaries.pluralith" => Ok(display_path(&config.binaries.pluralith)),
        "binaries.terraform" => Ok(display_path(&config.binaries.terraform)),
        "defaults.api_key" => Ok(config
            .redacted()
            .defaults
            .api_key
            .unwrap_or_default()),
        "defaults.project_id" => Ok(config.defaults.project_id.clone().unwrap_or_default()),
        "defaults.init_terraform" => Ok(config
            .defaults
            .init_terraform
            .unwrap_or(false)
            .to_string()),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        "output.format" => Ok(config.output.format.clone()),
        _ => Err(CliError::ConfigError {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        }),
    }
}

fn render_toml(config: &AppConfig) -> CliResult<String> {
    toml::to_string_pretty(config).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })
}

fn write_default(path: &Path, force: bool) -> CliResult<()> {
    if path.exists() && !force {
        return Err(CliError::ConfigExists {
            path: path.to_path_buf(),
        });
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_cli_context(|| format!("creating {}", parent.display()))?;
    }

    let contents = render_toml(&AppConfig::default())?;
    std::fs::write(path, contents).with_cli_context(|| format!("writing {}", path.display()))
}

// ── tests ─────────────────────────────────────────────────────────────────────
