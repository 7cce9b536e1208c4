// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for pluralith-runner.
//!
//! This module contains pure logic with no I/O. Running processes and
//! locating binaries are handled via ports (traits) defined in the
//! application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, process, or network calls
//! - **No tracing**: Observability belongs to the application and CLI layers
//! - **Immutable entities**: `ExecutableSpec` and `StageOutcome` are never mutated
//!
// Public API - what the world sees
pub mod classifier;
pub mod command_builder;
pub mod entities;
pub mod error;
pub mod value_objects;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use classifier::Classification;
pub use command_builder::CommandBuilder;
pub use entities::{
    ExecutableSpec, ProcessOutput, RunConfig, RunParams, RunReport, StageOutcome,
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{KeyValues, PluralithCommand, Stage, TerraformCommand, Tool};

pub use validation::DomainValidator;
