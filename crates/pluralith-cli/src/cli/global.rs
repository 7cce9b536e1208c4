//! Flags shared by `exec`, `config` and `completions`.
//!
//! They are `global`, so `pluralith-run exec run -v` and
//! `pluralith-run -v exec run` mean the same thing.

use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Default, Args)]
pub struct GlobalArgs {
    /// Log more about each stage. Repeat for more detail.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase verbosity (-v, -vv, -vvv)",
        long_help = "How much the runner logs to stderr:
    (none)  - warnings and errors
    -v      - one line per stage
    -vv     - binary lookup and state transitions
    -vvv    - process exit details"
    )]
    pub verbose: u8,

    /// Only errors reach stderr. The report is still printed.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Only log errors"
    )]
    pub quiet: bool,

    /// Plain text even on a colour terminal. Also set by `NO_COLOR`.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// TOML file with binary paths and default credentials.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        env = "PLURALITH_RUN_CONFIG",
        value_name = "FILE",
        help = "Runner configuration file"
    )]
    pub config: Option<PathBuf>,

    /// Rendering of the run report and of failures.
    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "Report format"
    )]
    pub output_format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `output.format` from the config, else human on a TTY and plain otherwise.
    #[default]
    Auto,
    /// Coloured summary with a spinner while a stage runs.
    Human,
    /// Summary without colour or spinner.
    Plain,
    /// The report, or `{failed, changed, msg}`, as one JSON document.
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    #[test]
    fn flags_are_accepted_after_the_subcommand() {
        let cli = Cli::try_parse_from([
            "pluralith-run",
            "exec",
            "run",
            "-vv",
            "--output-format",
            "json",
            "--config",
            "runner.toml",
        ])
        .unwrap();
        assert_eq!(cli.global.verbose, 2);
        assert_eq!(cli.global.output_format, OutputFormat::Json);
        assert_eq!(cli.global.config, Some(PathBuf::from("runner.toml")));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        assert!(Cli::try_parse_from(["pluralith-run", "-q", "-v", "config", "path"]).is_err());
    }

    #[test]
    fn format_defaults_to_auto() {
        let cli = Cli::try_parse_from(["pluralith-run", "config", "path"]).unwrap();
        assert_eq!(cli.global.output_format, OutputFormat::Auto);
    }
}
