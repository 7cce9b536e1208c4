//! pluralith-core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for
//! pluralith-runner: an idempotent wrapper that turns a declarative request
//! into a `terraform init` (optional) followed by one Pluralith command, and
//! reduces their exit codes into a single `changed` report.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │        pluralith-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │      (RunService, ReportBuilder)        │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Driven: ProcessExecutor, BinaryLocator)│
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   pluralith-adapters (Infrastructure)   │
//! │ (LocalProcessExecutor, PathLocator, ...)│
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (RunParams, CommandBuilder, Classifier) │
//! │         No I/O, no tracing              │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pluralith_core::prelude::*;
//!
//! // 1. Describe the request
//! let params = RunParams::new("run", "/srv/infra");
//!
//! // 2. Use application service (with injected adapters)
//! let service = RunService::new(executor, locator);
//! let report = service.run(params, RunOptions::default()).unwrap();
//! println!("changed: {}", report.changed);
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ReportBuilder, RunOptions, RunService,
        ports::{BinaryLocator, ProcessExecutor},
    };
    pub use crate::domain::{
        Classification, CommandBuilder, ExecutableSpec, KeyValues, ProcessOutput, RunConfig,
        RunParams, RunReport, Stage, StageOutcome, Tool,
    };
    pub use crate::error::{PluralithError, PluralithResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
