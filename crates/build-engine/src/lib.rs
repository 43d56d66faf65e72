//! External toolchain dispatch
//!
//! Assembles command lines for the system C compiler, the AnteaterLang
//! interpreter, and ad hoc shell commands, runs each on its own background
//! unit, and streams the captured output into the shared console.

pub mod clib;
pub mod interpreter;
pub mod process;
pub mod shell;
pub mod toolchain;

pub use clib::{CompilePlan, LibraryBuilder};
pub use interpreter::{ProgramRunner, RunPlan};
pub use process::{Invocation, ProcessResult, ProcessRunner, SystemRunner};
pub use shell::ShellExecutor;
pub use toolchain::language_version;

use std::path::PathBuf;

/// Dispatch errors: preconditions that abort before any process invocation.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("{0} has not been set")]
    SourceNotSet(&'static str),
    #[error("shared library not built at {0:?}")]
    LibraryNotBuilt(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DispatchError {
    /// Title for the interactive notice shown when dispatch aborts.
    pub fn title(&self) -> &'static str {
        match self {
            DispatchError::SourceNotSet(_) => "Source Not Set",
            DispatchError::LibraryNotBuilt(_) => "C Acc Library Not Found",
            DispatchError::Io(_) => "Error",
        }
    }

    /// Body for the interactive notice shown when dispatch aborts.
    pub fn user_message(&self) -> String {
        match self {
            DispatchError::SourceNotSet(what) => format!("Please set the {} file.", what),
            DispatchError::LibraryNotBuilt(_) => "The C Acc Library has not been compiled. \
                 Please compile the C Acc Library before running the code."
                .to_string(),
            DispatchError::Io(e) => format!("File operation failed: {}", e),
        }
    }
}
