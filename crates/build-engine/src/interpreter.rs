//! Interpreter runs
//!
//! Assembles the `antlang` command line and dispatches it onto a background
//! unit. Captured stdout and stderr land in the console followed by a blank
//! line; overlapping runs may interleave there, which is accepted.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use anteater_core::{lang, Console, MessageColor};

use crate::process::{Invocation, ProcessRunner};
use crate::DispatchError;

/// A validated run, ready to dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPlan {
    pub source: PathBuf,
    /// Shared library handed to the interpreter, when running with one.
    pub library: Option<PathBuf>,
}

/// Runs AnteaterLang sources through the external interpreter.
#[derive(Clone)]
pub struct ProgramRunner {
    project_root: PathBuf,
    console: Arc<Console>,
    runner: Arc<dyn ProcessRunner>,
}

impl ProgramRunner {
    pub fn new(
        project_root: PathBuf,
        console: Arc<Console>,
        runner: Arc<dyn ProcessRunner>,
    ) -> Self {
        Self {
            project_root,
            console,
            runner,
        }
    }

    /// Path where a built shared library is expected.
    pub fn shared_library_path(&self) -> PathBuf {
        self.project_root.join(lang::SHARED_LIBRARY_NAME)
    }

    /// Command line for an interpreter run. The library path, when present,
    /// comes before the source path.
    pub fn run_command(source: &Path, library: Option<&Path>) -> Invocation {
        let mut invocation = Invocation::new(lang::INTERPRETER_BINARY);
        if let Some(library) = library {
            invocation = invocation.arg(library.display().to_string());
        }
        invocation.arg(source.display().to_string())
    }

    /// Validate preconditions without touching any process. With
    /// `with_library`, the shared library must already exist at its fixed
    /// path.
    pub fn prepare(
        &self,
        source: Option<&Path>,
        with_library: bool,
    ) -> Result<RunPlan, DispatchError> {
        let source = source
            .ok_or(DispatchError::SourceNotSet(lang::SOURCE_DESCRIPTION))?
            .to_path_buf();

        let library = if with_library {
            let library = self.shared_library_path();
            if !library.exists() {
                return Err(DispatchError::LibraryNotBuilt(library));
            }
            Some(library)
        } else {
            None
        };

        Ok(RunPlan { source, library })
    }

    /// Dispatch a validated run onto its own background unit and return
    /// immediately. The unit cannot be cancelled.
    pub fn spawn(&self, plan: RunPlan) {
        if plan.library.is_none() {
            self.console.print_message(
                &format!("Using AnteaterLang source @ {}", plan.source.display()),
                MessageColor::Blue,
            );
        }
        let runner = self.clone();
        tokio::task::spawn_blocking(move || runner.execute(&plan.source, plan.library.as_deref()));
    }

    /// The blocking run job.
    pub fn execute(&self, source: &Path, library: Option<&Path>) {
        let invocation = Self::run_command(source, library).current_dir(&self.project_root);
        info!("Running {}", invocation);

        match self.runner.run(&invocation) {
            Ok(result) => {
                self.console.append(&result.stdout);
                if !result.stderr.is_empty() {
                    self.console.append(&result.stderr);
                }
                self.console.append_blank();
            }
            Err(e) => {
                self.console.print_message(
                    &format!("Failed to invoke {}: {}", lang::INTERPRETER_BINARY, e),
                    MessageColor::Red,
                );
            }
        }
    }
}
