//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from the host system.
//! The `pluralith-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::{ExecutableSpec, ProcessOutput, Tool};
use crate::error::PluralithResult;

/// Port for running an external process to completion.
///
/// Implemented by:
/// - `pluralith_adapters::process::LocalProcessExecutor` (production)
/// - `pluralith_adapters::process::ScriptedExecutor` (testing)
///
/// ## Contract
///
/// - Blocks until the child exits; no timeout is imposed here
/// - Runs `spec.program()` with exactly `spec.args()`, no shell
/// - Non-zero exit codes are *not* errors; only failure to launch is
#[cfg_attr(test, mockall::automock)]
pub trait ProcessExecutor: Send + Sync {
    /// Run `spec` with `working_dir` as its current directory.
    fn execute(&self, spec: &ExecutableSpec, working_dir: &Path) -> PluralithResult<ProcessOutput>;
}

/// Port for resolving a tool to an executable path.
///
/// Implemented by:
/// - `pluralith_adapters::locator::PathLocator` (searches `PATH`)
/// - `pluralith_adapters::locator::StaticLocator` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait BinaryLocator: Send + Sync {
    /// Fails with `ApplicationError::BinaryNotFound` when the tool is absent.
    fn locate(&self, tool: Tool) -> PluralithResult<PathBuf>;
}
