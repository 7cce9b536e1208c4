//! Fixed-table binary locator for testing and pinned installs.

use std::{collections::HashMap, path::PathBuf};

use pluralith_core::{
    application::{ApplicationError, ports::BinaryLocator},
    domain::Tool,
    error::PluralithResult,
};

/// Resolves tools from a fixed table; anything not registered is missing.
#[derive(Debug, Clone, Default)]
pub struct StaticLocator {
    paths: HashMap<Tool, PathBuf>,
}

impl StaticLocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `path` for `tool`.
    pub fn with(mut self, tool: Tool, path: impl Into<PathBuf>) -> Self {
        self.paths.insert(tool, path.into());
        self
    }
}

impl BinaryLocator for StaticLocator {
    fn locate(&self, tool: Tool) -> PluralithResult<PathBuf> {
        self.paths.get(&tool).cloned().ok_or_else(|| {
            ApplicationError::BinaryNotFound {
                tool,
                reason: "not registered".into(),
            }
            .into()
        })
    }
}
