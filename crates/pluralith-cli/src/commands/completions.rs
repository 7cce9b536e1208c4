//! Shell completion generation.

use clap::CommandFactory;
use clap_complete::{Generator, generate, shells};

use crate::cli::{Cli, CompletionsArgs, Shell};

const BIN_NAME: &str = "pluralith-run";

pub fn execute(args: CompletionsArgs) -> crate::error::CliResult<()> {
    let mut out = std::io::stdout();
    match args.shell {
        Shell::Bash => write(shells::Bash, &mut out),
        Shell::Zsh => write(shells::Zsh, &mut out),
        Shell::Fish => write(shells::Fish, &mut out),
        Shell::PowerShell => write(shells::PowerShell, &mut out),
        Shell::Elvish => write(shells::Elvish, &mut out),
    }
    Ok(())
}

fn write<G: Generator>(shell: G, out: &mut dyn std::io::Write) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, BIN_NAME, out);
}
