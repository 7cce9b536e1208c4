//! Unified error handling for pluralith-core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for pluralith-core operations.
///
/// This enum wraps all possible errors that can occur when using
/// pluralith-core, providing a unified interface for error handling.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PluralithError {
    /// Invalid input or a request that cannot be turned into a command line.
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Failures while locating or running the tools.
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl PluralithError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => vec![
                "This appears to be a bug in pluralith-runner".into(),
                "Please report this issue at: https://github.com/cosecruz/pluralith-runner/issues"
                    .into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Unsupported => ErrorCategory::Validation,
            },
            Self::Application(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// `true` when a wrapped tool ran and exited fatally.
    pub fn is_tool_failure(&self) -> bool {
        matches!(self, Self::Application(ApplicationError::ToolFailed { .. }))
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    ToolFailure,
    Internal,
}

/// Convenient result type alias.
pub type PluralithResult<T> = Result<T, PluralithError>;
