//! Process invocation seam
//!
//! Every external tool call goes through [`ProcessRunner`], so dispatch
//! logic can be exercised without spawning real binaries. The system
//! implementation performs a blocking wait for completion; callers put it
//! on its own background unit via `tokio::task::spawn_blocking`.

use std::fmt;
use std::path::PathBuf;
use std::process::Command;

/// One external command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Wrap a free-form command string in the system shell.
    pub fn shell(command: &str) -> Self {
        Invocation::new("sh").arg("-c").arg(command)
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Captured result of one external process.
#[derive(Debug, Clone, Default)]
pub struct ProcessResult {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

/// Blocking process execution.
pub trait ProcessRunner: Send + Sync {
    fn run(&self, invocation: &Invocation) -> std::io::Result<ProcessResult>;
}

/// Runs invocations via the system, waiting for completion.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> std::io::Result<ProcessResult> {
        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args);
        if let Some(dir) = &invocation.cwd {
            command.current_dir(dir);
        }

        let output = command.output()?;
        Ok(ProcessResult {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            success: output.status.success(),
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Scripted runner recording every invocation it receives.
    #[derive(Default)]
    pub struct RecordingRunner {
        pub calls: Mutex<Vec<Invocation>>,
        results: Mutex<Vec<ProcessResult>>,
    }

    impl RecordingRunner {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue the result for the next invocation, in call order.
        pub fn push_result(&self, result: ProcessResult) {
            self.results.lock().unwrap().push(result);
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        pub fn recorded(&self) -> Vec<Invocation> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ProcessRunner for RecordingRunner {
        fn run(&self, invocation: &Invocation) -> std::io::Result<ProcessResult> {
            self.calls.lock().unwrap().push(invocation.clone());
            let mut results = self.results.lock().unwrap();
            if results.is_empty() {
                Ok(ProcessResult {
                    success: true,
                    ..Default::default()
                })
            } else {
                Ok(results.remove(0))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_invocation_shape() {
        let invocation = Invocation::shell("ls -la | head");
        assert_eq!(invocation.program, "sh");
        assert_eq!(invocation.args, vec!["-c".to_string(), "ls -la | head".to_string()]);
    }

    #[test]
    fn test_display_joins_program_and_args() {
        let invocation = Invocation::new("gcc").arg("-c").arg("main.c");
        assert_eq!(invocation.to_string(), "gcc -c main.c");
    }

    #[test]
    fn test_system_runner_captures_output() {
        let result = SystemRunner
            .run(&Invocation::shell("echo hello"))
            .unwrap();
        assert!(result.success);
        assert_eq!(result.stdout.trim_end(), "hello");
        assert!(result.stderr.is_empty());
    }
}
