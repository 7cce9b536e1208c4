//! Scripted process executor for testing.

use std::{
    collections::VecDeque,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use pluralith_core::{
    application::{ApplicationError, ports::ProcessExecutor},
    domain::{ExecutableSpec, ProcessOutput},
    error::{PluralithError, PluralithResult},
};

/// In-memory executor that replays queued outputs and records every
/// invocation. Clones share state, so a test can keep a handle after
/// boxing one into a service.
#[derive(Debug, Clone)]
pub struct ScriptedExecutor {
    inner: Arc<RwLock<ScriptedExecutorInner>>,
}

#[derive(Debug, Default)]
struct ScriptedExecutorInner {
    replies: VecDeque<ProcessOutput>,
    invocations: Vec<Invocation>,
}

/// One recorded call to [`ScriptedExecutor::execute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub spec: ExecutableSpec,
    pub working_dir: PathBuf,
}

impl ScriptedExecutor {
    /// Create an executor with nothing queued.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(ScriptedExecutorInner::default())),
        }
    }

    /// Queue the output for the next invocation.
    pub fn push(&self, output: ProcessOutput) -> PluralithResult<&Self> {
        self.inner
            .write()
            .map_err(|_| PluralithError::Internal {
                message: "scripted executor lock poisoned".into(),
            })?
            .replies
            .push_back(output);
        Ok(self)
    }

    /// Queue an exit code with empty streams.
    pub fn push_exit(&self, exit_code: i32) -> PluralithResult<&Self> {
        self.push(ProcessOutput::new(exit_code, "", ""))
    }

    /// Everything executed so far, in order.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.inner
            .read()
            .map(|inner| inner.invocations.clone())
            .unwrap_or_default()
    }

    /// Outputs still waiting to be consumed.
    pub fn pending(&self) -> usize {
        self.inner.read().map(|inner| inner.replies.len()).unwrap_or(0)
    }
}

impl Default for ScriptedExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessExecutor for ScriptedExecutor {
    fn execute(&self, spec: &ExecutableSpec, working_dir: &Path) -> PluralithResult<ProcessOutput> {
        let mut inner = self.inner.write().map_err(|_| PluralithError::Internal {
            message: "scripted executor lock poisoned".into(),
        })?;

        inner.invocations.push(Invocation {
            spec: spec.clone(),
            working_dir: working_dir.to_path_buf(),
        });

        inner.replies.pop_front().ok_or_else(|| {
            ApplicationError::SpawnFailed {
                program: spec.program().to_path_buf(),
                reason: "no scripted output left".into(),
            }
            .into()
        })
    }
}
