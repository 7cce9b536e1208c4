//! PATH-based binary locator.

use std::ffi::OsString;
use std::path::PathBuf;

use pluralith_core::{
    application::{ApplicationError, ports::BinaryLocator},
    domain::Tool,
    error::PluralithResult,
};
use tracing::debug;

/// Finds tools by name on the process `PATH` (or on an explicit search
/// path, for tests).
#[derive(Debug, Clone, Default)]
pub struct PathLocator {
    search_path: Option<OsString>,
}

impl PathLocator {
    /// Search the current process `PATH`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Search `paths` instead of the process `PATH`.
    pub fn with_search_path(paths: impl Into<OsString>) -> Self {
        Self {
            search_path: Some(paths.into()),
        }
    }
}

impl BinaryLocator for PathLocator {
    fn locate(&self, tool: Tool) -> PluralithResult<PathBuf> {
        let name = tool.binary_name();
        let found = match &self.search_path {
            Some(paths) => {
                let cwd = std::env::current_dir().map_err(|e| ApplicationError::BinaryNotFound {
                    tool,
                    reason: format!("cannot read current directory: {e}"),
                })?;
                which::which_in(name, Some(paths), cwd)
            }
            None => which::which(name),
        };

        match found {
            Ok(path) => {
                debug!(%tool, path = %path.display(), "Found binary on PATH");
                Ok(path)
            }
            Err(e) => Err(ApplicationError::BinaryNotFound {
                tool,
                reason: e.to_string(),
            }
            .into()),
        }
    }
}
