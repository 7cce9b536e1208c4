//! Application services - orchestrate use cases.
//!
//! `RunService` sequences the tool invocations; `ReportBuilder` folds their
//! outcomes into the report returned to the caller.

pub mod report_builder;
pub mod run_service;

pub use report_builder::ReportBuilder;
pub use run_service::{RunOptions, RunService};
