//! Process execution adapters.

mod local;
mod scripted;

pub use local::LocalProcessExecutor;
pub use scripted::{Invocation, ScriptedExecutor};
