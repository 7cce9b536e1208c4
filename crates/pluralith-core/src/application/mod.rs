//! Application layer for pluralith-runner.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (RunService, ReportBuilder)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer sequences the domain layer's pure functions around
//! the ports. Flag construction and classification live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{ReportBuilder, RunOptions, RunService};

// Re-export port traits (for adapter implementation)
pub use ports::{BinaryLocator, ProcessExecutor};

pub use error::ApplicationError;
