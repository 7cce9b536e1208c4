//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `PLURALITH_RUN__BINARIES__PLURALITH=/opt/bin/pluralith`
//! 3. Config file (`--config`, or the platform config dir)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use pluralith_core::domain::RunParams;
use serde::{Deserialize, Serialize};

const ENV_PREFIX: &str = "PLURALITH_RUN";
const ENV_SEPARATOR: &str = "__";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Pinned tool locations; unset means "look on PATH".
    pub binaries: BinariesConfig,
    /// Request fields applied when neither a flag nor the args file sets them.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinariesConfig {
    pub pluralith: Option<PathBuf>,
    pub terraform: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub api_key: Option<String>,
    pub project_id: Option<String>,
    pub init_terraform: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then file, then environment.
    ///
    /// An explicit `config_file` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        Self::load_from(&path, required)
    }

    fn load_from(path: &Path, required: bool) -> anyhow::Result<Self> {
        let defaults = Config::try_from(&Self::default())
            .context("Failed to serialise built-in defaults")?;

        Config::builder()
            .add_source(defaults)
            .add_source(File::new(&path.to_string_lossy(), FileFormat::Toml).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()
            .and_then(|config| config.try_deserialize::<Self>())
            .with_context(|| format!("Failed to load configuration from {}", path.display()))
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.pluralith-run.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "pluralith", "pluralith-run")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".pluralith-run.toml"))
    }

    /// The config's contribution to a request, used as the lowest-priority
    /// fallback when merging.
    pub fn as_params(&self) -> RunParams {
        RunParams {
            binary_path: self.binaries.pluralith.clone(),
            terraform_binary_path: self.binaries.terraform.clone(),
            api_key: self.defaults.api_key.clone(),
            project_id: self.defaults.project_id.clone(),
            init_terraform: self.defaults.init_terraform,
            ..RunParams::default()
        }
    }

    /// Copy of the config safe to print.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.defaults.api_key.is_some() {
            copy.defaults.api_key = Some("***".into());
        }
        copy
    }
}
