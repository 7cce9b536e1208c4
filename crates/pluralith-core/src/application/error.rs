//! Application layer errors.
//!
//! These errors represent failures while orchestrating the external tools,
//! not invalid input. Input errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::{Stage, Tool};
use crate::error::ErrorCategory;

/// Errors that occur during orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// No override was given and the locator could not find the tool.
    #[error("{tool} binary not found: {reason}")]
    BinaryNotFound { tool: Tool, reason: String },

    /// A stage classified as fatal. Aborts the remaining sequence.
    #[error(
        "{stage} failed with exit code {exit_code}\nSTDOUT: {stdout}\n\nSTDERR: {stderr}"
    )]
    ToolFailed {
        stage: Stage,
        exit_code: i32,
        stdout: String,
        stderr: String,
    },

    /// The process could not be started at all.
    #[error("Failed to launch {}: {reason}", .program.display())]
    SpawnFailed { program: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::BinaryNotFound { tool, .. } => vec![
                format!("Install {} and make sure it is on your PATH", tool),
                format!(
                    "Or point at it explicitly with --{}",
                    match tool {
                        Tool::Pluralith => "binary-path",
                        Tool::Terraform => "terraform-binary-path",
                    }
                ),
            ],
            Self::ToolFailed { stage, exit_code, .. } => {
                let mut hints = vec![format!("The {} stage exited with {}", stage, exit_code)];
                if *exit_code != 1 {
                    hints.push("Exit codes other than 0 and 2 are treated as failures".into());
                }
                if *stage == Stage::TerraformInit {
                    hints.push("The pluralith stage was not run".into());
                }
                hints
            }
            Self::SpawnFailed { program, .. } => vec![
                format!("Could not execute {}", program.display()),
                "Check that the file exists and is executable".into(),
                "Check that the project path exists".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::BinaryNotFound { .. } => ErrorCategory::NotFound,
            Self::ToolFailed { .. } => ErrorCategory::ToolFailure,
            Self::SpawnFailed { .. } => ErrorCategory::Internal,
        }
    }
}
