//! C acc library builds
//!
//! Two-step native build: compile the configured source to an object file,
//! then link it into the shared library alongside the runtime support
//! library. The link step is skipped when the compile step reports
//! anything on stderr.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use anteater_core::{lang, Console, MessageColor};

use crate::process::{Invocation, ProcessRunner};
use crate::DispatchError;

/// A validated build, ready to dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilePlan {
    pub source: PathBuf,
}

/// Builds the C acc library for one project.
#[derive(Clone)]
pub struct LibraryBuilder {
    project_root: PathBuf,
    console: Arc<Console>,
    runner: Arc<dyn ProcessRunner>,
}

impl LibraryBuilder {
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

    /// Command line for the compile-to-object step.
    pub fn object_command(source: &Path) -> Invocation {
        Invocation::new("gcc")
            .arg("-fPIC")
            .arg(format!("-I{}", lang::INCLUDE_DIR))
            .arg("-c")
            .arg(source.display().to_string())
            .arg("-o")
            .arg(lang::OBJECT_FILE_NAME)
    }

    /// Command line for the link-to-shared-object step.
    pub fn link_command() -> Invocation {
        Invocation::new("gcc")
            .arg("-shared")
            .arg("-o")
            .arg(lang::SHARED_LIBRARY_NAME)
            .arg(lang::OBJECT_FILE_NAME)
            .arg(format!("-L{}", lang::LIB_DIR))
            .arg(format!("-l{}", lang::RUNTIME_LIBRARY))
    }

    /// Validate preconditions without touching any process.
    pub fn prepare(&self, source: Option<&Path>) -> Result<CompilePlan, DispatchError> {
        let source = source
            .ok_or(DispatchError::SourceNotSet(lang::C_LIBRARY_DESCRIPTION))?
            .to_path_buf();
        Ok(CompilePlan { source })
    }

    /// Dispatch a validated build onto its own background unit and return
    /// immediately. The unit cannot be cancelled.
    pub fn spawn(&self, plan: CompilePlan) {
        let builder = self.clone();
        tokio::task::spawn_blocking(move || builder.compile_and_link(&plan.source));
    }

    /// The blocking build job. Runs on a background unit in production;
    /// tests call it directly with a scripted runner.
    pub fn compile_and_link(&self, source: &Path) {
        info!("Compiling C acc library from {:?}", source);

        let compile = Self::object_command(source).current_dir(&self.project_root);
        let compiled = match self.runner.run(&compile) {
            Ok(result) => result,
            Err(e) => {
                warn!("Failed to invoke C compiler: {}", e);
                self.console.print_message(
                    &format!("Failed to invoke C compiler: {}", e),
                    MessageColor::Red,
                );
                return;
            }
        };

        self.console.append(&compiled.stdout);
        if !compiled.stderr.is_empty() {
            // Compile errors end the build; the link step is never run.
            self.console.append(&compiled.stderr);
            return;
        }
        if !compiled.success {
            return;
        }

        let link = Self::link_command().current_dir(&self.project_root);
        let linked = match self.runner.run(&link) {
            Ok(result) => result,
            Err(e) => {
                warn!("Failed to invoke linker: {}", e);
                self.console.print_message(
                    &format!("Failed to invoke linker: {}", e),
                    MessageColor::Red,
                );
                return;
            }
        };

        self.console.append(&linked.stdout);
        if !linked.stderr.is_empty() {
            self.console.append(&linked.stderr);
        }

        self.console
            .print_message("C Acc Library compiled successfully!", MessageColor::Green);

        let object = self.project_root.join(lang::OBJECT_FILE_NAME);
        if object.exists() {
            let _ = std::fs::remove_file(object);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::testing::RecordingRunner;
    use crate::process::ProcessResult;

    fn builder(runner: Arc<RecordingRunner>, root: &Path) -> (LibraryBuilder, Arc<Console>) {
        let console = Arc::new(Console::new());
        (
            LibraryBuilder::new(root.to_path_buf(), console.clone(), runner),
            console,
        )
    }

    #[test]
    fn test_object_command_shape() {
        let invocation = LibraryBuilder::object_command(Path::new("userFunctions.c"));
        assert_eq!(
            invocation.to_string(),
            "gcc -fPIC -I/usr/local/include/anteaterlang -c userFunctions.c -o userFunctions.o"
        );
    }

    #[test]
    fn test_link_command_shape() {
        assert_eq!(
            LibraryBuilder::link_command().to_string(),
            "gcc -shared -o libuserFunctions.so userFunctions.o -L/usr/local/lib -llang"
        );
    }

    #[test]
    fn test_unset_source_aborts_before_any_invocation() {
        let runner = Arc::new(RecordingRunner::new());
        let (builder, _) = builder(runner.clone(), Path::new("/tmp/project"));

        assert!(matches!(
            builder.prepare(None),
            Err(DispatchError::SourceNotSet(_))
        ));
        assert_eq!(runner.call_count(), 0);
    }

    #[test]
    fn test_compile_error_skips_link_step() {
        let dir = tempfile::tempdir().unwrap();
        let runner = Arc::new(RecordingRunner::new());
        runner.push_result(ProcessResult {
            stderr: "userFunctions.c:3: error: expected ';'".into(),
            success: false,
            ..Default::default()
        });
        let (builder, console) = builder(runner.clone(), dir.path());

        builder.compile_and_link(Path::new("userFunctions.c"));

        // Only the object-compile step ran.
        let recorded = runner.recorded();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].program, "gcc");
        assert!(recorded[0].args.contains(&"-c".to_string()));
        // The error text lands in the console verbatim, with no success notice.
        assert!(console.text().contains("expected ';'"));
        assert!(!console.text().contains("compiled successfully"));
    }

    #[test]
    fn test_successful_build_links_and_removes_object_file() {
        let dir = tempfile::tempdir().unwrap();
        let object = dir.path().join(lang::OBJECT_FILE_NAME);
        std::fs::write(&object, b"o").unwrap();

        let runner = Arc::new(RecordingRunner::new());
        let (builder, console) = builder(runner.clone(), dir.path());

        builder.compile_and_link(Path::new("userFunctions.c"));

        let recorded = runner.recorded();
        assert_eq!(recorded.len(), 2);
        assert!(recorded[1].args.contains(&"-shared".to_string()));
        assert_eq!(recorded[0].cwd.as_deref(), Some(dir.path()));
        assert!(console.text().contains("C Acc Library compiled successfully!"));
        assert!(!object.exists());
    }
}
