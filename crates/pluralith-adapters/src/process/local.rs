//! Local process executor using std::process.

use std::io;
use std::path::Path;
use std::process::Command;

use pluralith_core::{
    application::{ApplicationError, ports::ProcessExecutor},
    domain::{ExecutableSpec, ProcessOutput},
    error::{PluralithError, PluralithResult},
};
use tracing::{debug, trace};

/// Exit code reported when the child was terminated by a signal.
const SIGNALLED_EXIT_CODE: i32 = -1;

/// Production executor: spawns the program directly (no shell), waits for
/// it, and captures both streams.
#[derive(Debug, Clone, Copy)]
pub struct LocalProcessExecutor;

impl LocalProcessExecutor {
    /// Create a new local process executor.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalProcessExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessExecutor for LocalProcessExecutor {
    fn execute(&self, spec: &ExecutableSpec, working_dir: &Path) -> PluralithResult<ProcessOutput> {
        debug!(
            program = %spec.program().display(),
            cwd = %working_dir.display(),
            "Spawning process"
        );

        let output = Command::new(spec.program())
            .args(spec.args())
            .current_dir(working_dir)
            .output()
            .map_err(|e| map_spawn_error(spec.program(), working_dir, e))?;

        let exit_code = output.status.code().unwrap_or(SIGNALLED_EXIT_CODE);
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        trace!(
            exit_code,
            stdout_bytes = output.stdout.len(),
            stderr_bytes = output.stderr.len(),
            "Process exited"
        );

        Ok(ProcessOutput::new(exit_code, stdout, stderr))
    }
}

fn map_spawn_error(program: &Path, working_dir: &Path, e: io::Error) -> PluralithError {
    let reason = match e.kind() {
        io::ErrorKind::NotFound if !working_dir.is_dir() => {
            format!("working directory {} does not exist", working_dir.display())
        }
        io::ErrorKind::NotFound => "no such file".to_string(),
        io::ErrorKind::PermissionDenied => "permission denied".to_string(),
        _ => e.to_string(),
    };

    ApplicationError::SpawnFailed {
        program: program.to_path_buf(),
        reason,
    }
    .into()
}
