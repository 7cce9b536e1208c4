//! Infrastructure adapters for pluralith-runner.
//!
//! This crate implements the ports defined in `pluralith-core::application::ports`.
//! It contains all process spawning and PATH lookup.

pub mod locator;
pub mod process;

// Re-export commonly used adapters
pub use locator::{PathLocator, StaticLocator};
pub use process::{Invocation, LocalProcessExecutor, ScriptedExecutor};
