use std::fmt;
use std::path::{Path, PathBuf};

/// Flags whose values never appear in rendered command lines.
const SECRET_FLAGS: &[&str] = &["--api-key="];

/// A fully-built process invocation: a program and its argv tokens.
///
/// Produced once per stage by `CommandBuilder` and never mutated afterwards.
/// `args[0]` is always the subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutableSpec {
    program: PathBuf,
    args: Vec<String>,
}

impl ExecutableSpec {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn subcommand(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }

    /// Space-joined command line with secret flag values masked.
    ///
    /// For logs and check-mode reports only; never fed back to a shell.
    pub fn command_line(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            match SECRET_FLAGS.iter().find(|flag| arg.starts_with(*flag)) {
                Some(flag) => {
                    line.push_str(flag);
                    line.push_str("***");
                }
                None => line.push_str(arg),
            }
        }
        line
    }
}

impl fmt::Display for ExecutableSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_masks_api_key() {
        let spec = ExecutableSpec::new(
            "/usr/bin/pluralith",
            vec![
                "init".into(),
                "--api-key=SECRET".into(),
                "--project-id=P1".into(),
            ],
        );
        let line = spec.command_line();
        assert_eq!(line, "/usr/bin/pluralith init --api-key=*** --project-id=P1");
        assert!(!line.contains("SECRET"));
        // argv itself is untouched
        assert_eq!(spec.args()[1], "--api-key=SECRET");
    }

    #[test]
    fn subcommand_is_first_arg() {
        let spec = ExecutableSpec::new("pluralith", vec!["run".into()]);
        assert_eq!(spec.subcommand(), Some("run"));
    }
}
