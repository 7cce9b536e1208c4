//! Raw invocation parameters and their normalized form.
//!
//! [`RunParams`] mirrors what a caller hands in (an args file, CLI flags):
//! every field is optional and several carry aliases. [`RunParams::normalize`]
//! turns it into a [`RunConfig`] where required fields are present and every
//! collection is concrete, so builders iterate without checking for `None`.
//!
//! # Domain purity
//!
//! Binary resolution needs the filesystem and is done by the application
//! layer; here the override paths are only carried through.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::{error::DomainError, value_objects::KeyValues};

/// Parameters exactly as supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunParams {
    /// Pluralith subcommand to run (`init`, `run`, ...).
    pub command: Option<String>,

    /// Explicit path to the `pluralith` binary.
    #[serde(alias = "bin_path")]
    pub binary_path: Option<PathBuf>,

    /// Explicit path to the `terraform` binary.
    #[serde(alias = "terraform_bin_path")]
    pub terraform_binary_path: Option<PathBuf>,

    /// Directory both tools run in.
    #[serde(alias = "chdir")]
    pub project_path: Option<PathBuf>,

    pub api_key: Option<String>,
    pub project_id: Option<String>,

    #[serde(alias = "vars")]
    pub variables: Option<KeyValues>,

    #[serde(alias = "var_files")]
    pub variable_files: Option<Vec<PathBuf>>,

    pub backend_config: Option<KeyValues>,
    pub backend_config_files: Option<Vec<PathBuf>>,

    /// Run `terraform init` before the Pluralith command.
    #[serde(alias = "terraform_init")]
    pub init_terraform: Option<bool>,
}

impl RunParams {
    /// Start from the two required fields.
    pub fn new(command: impl Into<String>, project_path: impl Into<PathBuf>) -> Self {
        Self {
            command: Some(command.into()),
            project_path: Some(project_path.into()),
            ..Self::default()
        }
    }

    /// Fill every field left unset here from `fallback`.
    ///
    /// Used to layer CLI flags over an args file, and configured defaults
    /// under both.
    pub fn or(self, fallback: RunParams) -> RunParams {
        RunParams {
            command: self.command.or(fallback.command),
            binary_path: self.binary_path.or(fallback.binary_path),
            terraform_binary_path: self.terraform_binary_path.or(fallback.terraform_binary_path),
            project_path: self.project_path.or(fallback.project_path),
            api_key: self.api_key.or(fallback.api_key),
            project_id: self.project_id.or(fallback.project_id),
            variables: self.variables.or(fallback.variables),
            variable_files: self.variable_files.or(fallback.variable_files),
            backend_config: self.backend_config.or(fallback.backend_config),
            backend_config_files: self.backend_config_files.or(fallback.backend_config_files),
            init_terraform: self.init_terraform.or(fallback.init_terraform),
        }
    }

    /// Validate required fields and apply defaults.
    pub fn normalize(self) -> Result<RunConfig, DomainError> {
        let command = self
            .command
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or(DomainError::MissingRequiredField { field: "command" })?;

        let project_path = self
            .project_path
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(DomainError::MissingRequiredField {
                field: "project_path",
            })?;

        Ok(RunConfig {
            command,
            project_path,
            binary_path: self.binary_path.filter(|p| !p.as_os_str().is_empty()),
            terraform_binary_path: self
                .terraform_binary_path
                .filter(|p| !p.as_os_str().is_empty()),
            api_key: self.api_key.unwrap_or_default(),
            project_id: self.project_id.unwrap_or_default(),
            variables: self.variables.unwrap_or_default(),
            variable_files: self.variable_files.unwrap_or_default(),
            backend_config: self.backend_config.unwrap_or_default(),
            backend_config_files: self.backend_config_files.unwrap_or_default(),
            init_terraform: self.init_terraform.unwrap_or(false),
        })
    }
}

/// Fully-defaulted parameters. Only produced by [`RunParams::normalize`].
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub command: String,
    pub project_path: PathBuf,
    pub binary_path: Option<PathBuf>,
    pub terraform_binary_path: Option<PathBuf>,
    pub api_key: String,
    pub project_id: String,
    pub variables: KeyValues,
    pub variable_files: Vec<PathBuf>,
    pub backend_config: KeyValues,
    pub backend_config_files: Vec<PathBuf>,
    pub init_terraform: bool,
}
