// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

use crate::domain::value_objects::Tool;

/// Root domain error type.
///
/// Every variant is raised before any process is spawned for the stage it
/// concerns. All errors are:
/// - Cloneable
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("Unsafe value for {flag} ('{value}'): {reason}")]
    UnsafeFlagValue {
        flag: &'static str,
        value: String,
        reason: &'static str,
    },

    // ========================================================================
    // Build Errors
    // ========================================================================
    #[error("{tool} has no supported subcommand '{subcommand}'")]
    UnsupportedSubcommand { tool: Tool, subcommand: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingRequiredField { field } => vec![
                format!("'{}' must be set and non-empty", field),
                "Pass it as a flag or add it to the args file".into(),
            ],
            Self::UnsafeFlagValue { flag, .. } => vec![
                format!("Values passed through {} cannot be quoted safely", flag),
                "Keys must not contain '=' or '\"'".into(),
                "Values must not contain '\"' or control characters".into(),
                "Move complex values into a variable file instead".into(),
            ],
            Self::UnsupportedSubcommand { tool, .. } => match tool {
                Tool::Pluralith => vec![
                    "Supported pluralith commands:".into(),
                    "  init, login, plan, run, graph, apply, destroy, strip".into(),
                ],
                Tool::Terraform => vec!["Only 'terraform init' is orchestrated".into()],
            },
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingRequiredField { .. } | Self::UnsafeFlagValue { .. } => {
                ErrorCategory::Validation
            }
            Self::UnsupportedSubcommand { .. } => ErrorCategory::Unsupported,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Unsupported,
}
