//! Ad hoc shell commands
//!
//! One free-form command string at a time, echoed with a `$ ` prompt and
//! executed through the system shell. No sandboxing, no validation.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use anteater_core::{Console, MessageColor};

use crate::process::{Invocation, ProcessRunner};

/// Executes free-form commands against the shared console.
#[derive(Clone)]
pub struct ShellExecutor {
    project_root: PathBuf,
    console: Arc<Console>,
    runner: Arc<dyn ProcessRunner>,
}

impl ShellExecutor {
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

    /// Echo the prompt line and dispatch the command onto its own
    /// background unit.
    pub fn dispatch(&self, command: &str) {
        debug!("Shell command: {}", command);
        self.console.append(&format!("$ {}", command));

        let executor = self.clone();
        let command = command.to_string();
        tokio::task::spawn_blocking(move || executor.execute(&command));
    }

    /// The blocking job.
    pub fn execute(&self, command: &str) {
        let invocation = Invocation::shell(command).current_dir(&self.project_root);
        match self.runner.run(&invocation) {
            Ok(result) => {
                self.console.append(&result.stdout);
                if !result.stderr.is_empty() {
                    self.console.append(&result.stderr);
                }
                self.console.append_blank();
            }
            Err(e) => {
                self.console
                    .print_message(&format!("Failed to run command: {}", e), MessageColor::Red);
            }
        }
    }
}
