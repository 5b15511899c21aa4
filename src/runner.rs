//! Orchestration of a single Ghostscript run.
//!
//! [`CommandRunner::run`] performs the stages in a fixed order and stops at
//! the first failure:
//!
//! 1. environment: locate the executable
//! 2. validate the request paths
//! 3. merge the default flags
//! 4. invoke the executable
//! 5. map a non-zero exit to [`GhostscriptError::ExecutionFailed`]
//!
//! Nothing is retried.

use crate::config::RunnerConfig;
use crate::error::GhostscriptError;
use crate::executable::{detect_executable, resolve_executable};
use crate::pipeline::flags::merge_defaults;
use crate::pipeline::invoke::invoke;
use crate::pipeline::validate::InvocationRequest;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Runs Ghostscript for one request at a time. Holds no per-run state.
#[derive(Debug, Clone, Default)]
pub struct CommandRunner {
    config: RunnerConfig,
}

impl CommandRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    /// Whether the configured executable can be found and run.
    pub fn detect_executable(&self) -> bool {
        detect_executable(&self.config.executable)
    }

    /// Transform `request.input_path` into `request.output_path`.
    ///
    /// Returns the output path on success so the caller can report it.
    ///
    /// # Errors
    /// - [`GhostscriptError::ExecutableNotFound`] when Ghostscript is missing
    /// - any argument error from [`crate::pipeline::validate::validate_request`]
    /// - [`GhostscriptError::ExecutionFailed`] carrying Ghostscript's last
    ///   line of output when it exits non-zero
    pub fn run(&self, request: &InvocationRequest) -> Result<PathBuf, GhostscriptError> {
        let start = Instant::now();
        if let Ok(json) = serde_json::to_string(&self.config) {
            debug!("Runner config: {}", json);
        }

        // ── Step 1: Environment ──────────────────────────────────────────
        let executable = resolve_executable(&self.config.executable).ok_or_else(|| {
            GhostscriptError::ExecutableNotFound {
                executable: self.config.executable.clone(),
            }
        })?;

        // ── Step 2: Validate ─────────────────────────────────────────────
        let paths = request.validate()?;
        info!(
            "Running Ghostscript: {} -> {}",
            paths.input.display(),
            paths.output.display()
        );

        // ── Step 3: Merge defaults ───────────────────────────────────────
        let flags = merge_defaults(request.extra_flags.as_slice());
        debug!("Resolved flags: {:?}", flags.as_slice());

        // ── Step 4: Invoke ───────────────────────────────────────────────
        let result = invoke(
            &executable,
            &flags,
            &paths.input,
            &paths.output,
            self.config.timeout(),
        )?;

        // ── Step 5: Exit status ──────────────────────────────────────────
        if !result.success() {
            let message = result
                .diagnostic()
                .map(str::to_string)
                .unwrap_or_else(|| {
                    format!("Ghostscript exited with status {}", result.exit_code)
                });
            warn!("Ghostscript failed ({}): {}", result.exit_code, message);
            if let Ok(json) = serde_json::to_string(&result) {
                debug!("Captured output: {}", json);
            }
            return Err(GhostscriptError::ExecutionFailed {
                exit_code: result.exit_code,
                message,
            });
        }

        info!(
            "File written: {} in {}ms",
            paths.output.display(),
            start.elapsed().as_millis()
        );
        Ok(paths.output)
    }
}

/// Run `request` with the default configuration (`gs` on `PATH`, no timeout).
pub fn run(request: &InvocationRequest) -> Result<PathBuf, GhostscriptError> {
    CommandRunner::default().run(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_executable_is_environment_error() {
        let runner = CommandRunner::new(
            RunnerConfig::builder()
                .executable("definitely-not-a-real-ghostscript-binary")
                .build()
                .unwrap(),
        );
        assert!(!runner.detect_executable());

        // Environment is checked before the (invalid) request.
        let err = runner
            .run(&InvocationRequest::new("", "out.pdf"))
            .unwrap_err();
        assert!(err.is_environment_error(), "got: {err}");
    }

    #[cfg(unix)]
    mod process {
        use super::*;
        use std::os::unix::fs::PermissionsExt;
        use tempfile::TempDir;

        const WRITE_OUTPUT: &str = r#"for a in "$@"; do
  case "$a" in -sOutputFile=*) out="${a#-sOutputFile=}" ;; esac
done
printf '%%PDF-1.4\n' > "$out""#;

        fn runner_with(dir: &TempDir, body: &str) -> CommandRunner {
            let path = dir.path().join("gs");
            std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            CommandRunner::new(
                RunnerConfig::builder()
                    .executable(path.to_str().unwrap())
                    .timeout_secs(30)
                    .build()
                    .unwrap(),
            )
        }

        fn input_pdf(dir: &TempDir) -> String {
            let p = dir.path().join("input.pdf");
            std::fs::write(&p, b"%PDF-1.7\n").unwrap();
            p.to_str().unwrap().to_string()
        }

        #[test]
        fn success_returns_output_path() {
            let dir = tempfile::tempdir().unwrap();
            let runner = runner_with(&dir, WRITE_OUTPUT);
            assert!(runner.detect_executable());

            let output = dir.path().join("output.pdf");
            let req = InvocationRequest::new(input_pdf(&dir), output.to_str().unwrap())
                .flag("dCompatibilityLevel=1.4");

            let written = runner.run(&req).unwrap();
            assert_eq!(written, output);
            let bytes = std::fs::read(&output).unwrap();
            assert!(bytes.starts_with(b"%PDF-1.4"));
        }

        #[test]
        fn failure_forwards_last_stdout_line() {
            let dir = tempfile::tempdir().unwrap();
            let runner = runner_with(
                &dir,
                "echo 'GPL Ghostscript 10.0'\necho 'Unknown device: invalidDevice'\n\
                 echo 'Unrecoverable error, exit code 1' >&2\nexit 1",
            );
            let out = dir.path().join("out.pdf");
            let req = InvocationRequest::new(input_pdf(&dir), out.to_str().unwrap())
                .flag("sDEVICE=invalidDevice");

            let err = runner.run(&req).unwrap_err();
            match err {
                GhostscriptError::ExecutionFailed { exit_code, message } => {
                    assert_eq!(exit_code, 1);
                    assert_eq!(message, "Unknown device: invalidDevice");
                }
                other => panic!("unexpected error: {other}"),
            }
        }

        #[test]
        fn silent_failure_reports_status() {
            let dir = tempfile::tempdir().unwrap();
            let runner = runner_with(&dir, "exit 7");
            let out = dir.path().join("out.pdf");
            let req = InvocationRequest::new(input_pdf(&dir), out.to_str().unwrap());

            let err = runner.run(&req).unwrap_err();
            assert_eq!(err.to_string(), "Ghostscript exited with status 7");
        }

        #[test]
        fn validation_runs_before_invocation() {
            let dir = tempfile::tempdir().unwrap();
            // Would fail loudly if it were ever started.
            let runner = runner_with(&dir, "echo started\nexit 99");
            let missing = dir.path().join("no-file.pdf");
            let out = dir.path().join("out.pdf");

            let err = runner
                .run(&InvocationRequest::new(
                    missing.to_str().unwrap(),
                    out.to_str().unwrap(),
                ))
                .unwrap_err();
            assert!(err.is_argument_error());
            assert!(err.to_string().contains(missing.to_str().unwrap()));
        }
    }
}
