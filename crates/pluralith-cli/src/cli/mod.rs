//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "pluralith-run",
    bin_name = "pluralith-run",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Idempotent runner for the Pluralith CLI",
    long_about = "pluralith-run optionally initialises Terraform, runs one Pluralith \
                  command, and reports whether anything changed.",
    after_help = "EXAMPLES:\n\
        \x20 pluralith-run exec init --project-path ./infra --api-key $KEY --project-id 42\n\
        \x20 pluralith-run exec run  --project-path ./infra --var region=eu-west-1 --init-terraform\n\
        \x20 pluralith-run --output-format json exec graph --args-file params.json\n\
        \x20 pluralith-run completions bash > /usr/share/bash-completion/completions/pluralith-run",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a Pluralith command, optionally after `terraform init`.
    #[command(
        visible_alias = "x",
        about = "Run a Pluralith command",
        after_help = "EXAMPLES:\n\
            \x20 pluralith-run exec plan  --project-path ./infra\n\
            \x20 pluralith-run exec run   --project-path ./infra --var-file prod.tfvars\n\
            \x20 pluralith-run exec graph --project-path ./infra --check"
    )]
    Exec(ExecArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 pluralith-run completions bash > ~/.local/share/bash-completion/completions/pluralith-run\n\
            \x20 pluralith-run completions zsh  > ~/.zfunc/_pluralith-run\n\
            \x20 pluralith-run completions fish > ~/.config/fish/completions/pluralith-run.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the configuration file.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 pluralith-run config get binaries.pluralith\n\
            \x20 pluralith-run config list\n\
            \x20 pluralith-run config init"
    )]
    Config(ConfigCommands),
}

// ── exec ──────────────────────────────────────────────────────────────────────

/// Arguments for `pluralith-run exec`.
///
/// Every field is optional at the clap level so that an `--args-file` can
/// supply it instead; flags win over the file.
#[derive(Debug, Default, Args)]
pub struct ExecArgs {
    /// Pluralith subcommand (init, login, plan, run, graph, apply, destroy, strip).
    #[arg(value_name = "COMMAND", help = "Pluralith subcommand to run")]
    pub command: Option<String>,

    /// Directory both tools run in.
    #[arg(
        short = 'p',
        long = "project-path",
        visible_alias = "chdir",
        value_name = "DIR",
        help = "Project directory"
    )]
    pub project_path: Option<PathBuf>,

    /// Explicit pluralith binary; skips the PATH lookup.
    #[arg(
        long = "binary-path",
        visible_alias = "bin-path",
        value_name = "FILE",
        help = "Path to the pluralith binary"
    )]
    pub binary_path: Option<PathBuf>,

    /// Explicit terraform binary; skips the PATH lookup.
    #[arg(
        long = "terraform-binary-path",
        value_name = "FILE",
        help = "Path to the terraform binary"
    )]
    pub terraform_binary_path: Option<PathBuf>,

    #[arg(
        long = "api-key",
        env = "PLURALITH_API_KEY",
        hide_env_values = true,
        value_name = "KEY",
        help = "Pluralith API key (init only)"
    )]
    pub api_key: Option<String>,

    #[arg(
        long = "project-id",
        env = "PLURALITH_PROJECT_ID",
        value_name = "ID",
        help = "Pluralith project id (init only)"
    )]
    pub project_id: Option<String>,

    /// Terraform variable, repeatable. Order is preserved.
    #[arg(
        long = "var",
        value_name = "KEY=VALUE",
        value_parser = parse_key_value,
        help = "Terraform variable (repeatable)"
    )]
    pub variables: Vec<(String, String)>,

    #[arg(
        long = "var-file",
        value_name = "FILE",
        help = "Terraform variable file (repeatable)"
    )]
    pub variable_files: Vec<PathBuf>,

    /// Backend setting for `terraform init`, repeatable.
    #[arg(
        long = "backend-config",
        value_name = "KEY=VALUE",
        value_parser = parse_key_value,
        help = "Backend setting for terraform init (repeatable)"
    )]
    pub backend_config: Vec<(String, String)>,

    #[arg(
        long = "backend-config-file",
        value_name = "FILE",
        help = "Backend config file for terraform init (repeatable)"
    )]
    pub backend_config_files: Vec<PathBuf>,

    /// Run `terraform init` before the Pluralith command.
    #[arg(
        long = "init-terraform",
        visible_alias = "terraform-init",
        help = "Run terraform init first"
    )]
    pub init_terraform: bool,

    /// Resolve and build everything, but run nothing.
    #[arg(long = "check", visible_alias = "dry-run", help = "Show what would run")]
    pub check: bool,

    /// JSON file holding the request; flags override its fields.
    #[arg(
        long = "args-file",
        value_name = "FILE",
        help = "Read parameters from a JSON file"
    )]
    pub args_file: Option<PathBuf>,
}

/// Parse `KEY=VALUE`, splitting on the first `=`.
fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, _)) if key.is_empty() => Err(format!("missing key in '{raw}'")),
        Some((key, value)) => Ok((key.to_string(), value.to_string())),
        None => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `pluralith-run completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `pluralith-run config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `binaries.pluralith`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
    /// Write a default configuration file.
    Init {
        /// Overwrite an existing file.
        #[arg(short = 'f', long = "force")]
        force: bool,
    },
}

// ── tests ─────────────────────────────────────────────────────────────────────
