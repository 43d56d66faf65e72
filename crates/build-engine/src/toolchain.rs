//! Toolchain probe
//!
//! Version check for the external AnteaterLang interpreter.

use tracing::info;

use anteater_core::lang;

use crate::process::{Invocation, ProcessRunner};

/// Query `antlang --version`.
///
/// `None` means the toolchain is not installed: the binary could not be
/// invoked, or its output lacked the expected prefix.
pub fn language_version(runner: &dyn ProcessRunner) -> Option<String> {
    let invocation = Invocation::new(lang::INTERPRETER_BINARY).arg("--version");
    let result = runner.run(&invocation).ok()?;
    let version = parse_version_output(&result.stdout);
    match &version {
        Some(version) => info!("Detected {}", version),
        None => info!("{} not found on PATH", lang::INTERPRETER_BINARY),
    }
    version
}

/// Extract the version line when the expected prefix is present.
pub fn parse_version_output(stdout: &str) -> Option<String> {
    if stdout.starts_with(lang::VERSION_PREFIX) {
        Some(stdout.trim_end().to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::testing::RecordingRunner;
    use crate::process::ProcessResult;

    #[test]
    fn test_expected_prefix_yields_version() {
        assert_eq!(
            parse_version_output("AnteaterLang Version 0.1.0\n").as_deref(),
            Some("AnteaterLang Version 0.1.0")
        );
    }

    #[test]
    fn test_unexpected_output_means_not_installed() {
        assert_eq!(parse_version_output("sh: antlang: command not found\n"), None);
        assert_eq!(parse_version_output(""), None);
    }

    #[test]
    fn test_probe_invokes_version_flag() {
        let runner = RecordingRunner::new();
        runner.push_result(ProcessResult {
            stdout: "AnteaterLang Version 0.1.0\n".into(),
            success: true,
            ..Default::default()
        });

        let version = language_version(&runner);
        assert_eq!(version.as_deref(), Some("AnteaterLang Version 0.1.0"));

        let recorded = runner.recorded();
        assert_eq!(recorded[0].program, "antlang");
        assert_eq!(recorded[0].args, vec!["--version".to_string()]);
    }
}
