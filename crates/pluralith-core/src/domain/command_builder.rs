//! Flattening of a [`RunConfig`] into argv tokens for one tool invocation.
//!
//! Each tool has its own flag vocabulary:
//!
//! | tool / subcommand  | flags, in order |
//! |--------------------|-----------------|
//! | terraform `init`   | `--backend-config=k=v` per entry, then `--backend-config=<path>` per file |
//! | pluralith `init`   | `--api-key=<key>`, `--project-id=<id>` (each only when non-empty) |
//! | pluralith other    | `--var="k=v"` per entry, then `--var-file=<path>` per file |
//!
//! Map entries are emitted in insertion order. The builder is pure: identical
//! inputs always produce identical tokens. See `DomainValidator` for which
//! keys and values are rejected rather than escaped.

use std::path::Path;
use std::str::FromStr;

use crate::domain::{
    entities::{ExecutableSpec, RunConfig},
    error::DomainError,
    validation::DomainValidator as validator,
    value_objects::{KeyValues, PluralithCommand, TerraformCommand, Tool},
};

const BACKEND_CONFIG: &str = "--backend-config";
const API_KEY: &str = "--api-key";
const PROJECT_ID: &str = "--project-id";
const VAR: &str = "--var";
const VAR_FILE: &str = "--var-file";

pub struct CommandBuilder;

impl CommandBuilder {
    /// Build the invocation of `subcommand` on `tool`.
    ///
    /// Fails with [`DomainError::UnsupportedSubcommand`] when the tool has no
    /// such subcommand, and with [`DomainError::UnsafeFlagValue`] when a
    /// key, value or path cannot be placed into a token unambiguously.
    pub fn build(
        program: &Path,
        tool: Tool,
        subcommand: &str,
        config: &RunConfig,
    ) -> Result<ExecutableSpec, DomainError> {
        let args = match tool {
            Tool::Terraform => {
                let command = TerraformCommand::from_str(subcommand)?;
                let mut args = vec![command.as_str().to_string()];
                match command {
                    TerraformCommand::Init => backend_config_flags(config, &mut args)?,
                }
                args
            }
            Tool::Pluralith => {
                let command = PluralithCommand::from_str(subcommand)?;
                let mut args = vec![command.as_str().to_string()];
                match command {
                    PluralithCommand::Init => credential_flags(config, &mut args)?,
                    _ => variable_flags(config, &mut args)?,
                }
                args
            }
        };

        Ok(ExecutableSpec::new(program, args))
    }

    /// Check that `tool` knows `subcommand` without building anything, and
    /// return its canonical spelling.
    pub fn ensure_supported(tool: Tool, subcommand: &str) -> Result<&'static str, DomainError> {
        match tool {
            Tool::Terraform => TerraformCommand::from_str(subcommand).map(|c| c.as_str()),
            Tool::Pluralith => PluralithCommand::from_str(subcommand).map(|c| c.as_str()),
        }
    }
}

fn backend_config_flags(config: &RunConfig, args: &mut Vec<String>) -> Result<(), DomainError> {
    push_pairs(BACKEND_CONFIG, &config.backend_config, args, |k, v| {
        format!("{BACKEND_CONFIG}={k}={v}")
    })?;
    push_files(BACKEND_CONFIG, &config.backend_config_files, args)
}

fn credential_flags(config: &RunConfig, args: &mut Vec<String>) -> Result<(), DomainError> {
    for (flag, value) in [(API_KEY, &config.api_key), (PROJECT_ID, &config.project_id)] {
        if value.is_empty() {
            continue;
        }
        validator::validate_value(flag, value)?;
        args.push(format!("{flag}={value}"));
    }
    Ok(())
}

fn variable_flags(config: &RunConfig, args: &mut Vec<String>) -> Result<(), DomainError> {
    push_pairs(VAR, &config.variables, args, |k, v| format!("{VAR}=\"{k}={v}\""))?;
    push_files(VAR_FILE, &config.variable_files, args)
}

fn push_pairs(
    flag: &'static str,
    pairs: &KeyValues,
    args: &mut Vec<String>,
    render: impl Fn(&str, &str) -> String,
) -> Result<(), DomainError> {
    for (key, value) in pairs.iter() {
        validator::validate_key(flag, key)?;
        validator::validate_value(flag, value)?;
        args.push(render(key, value));
    }
    Ok(())
}

fn push_files(
    flag: &'static str,
    files: &[std::path::PathBuf],
    args: &mut Vec<String>,
) -> Result<(), DomainError> {
    for path in files {
        let path = validator::validate_path(flag, path)?;
        args.push(format!("{flag}={path}"));
    }
    Ok(())
}
