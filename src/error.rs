//! Error types for the ghostscript-console library.
//!
//! Every failure is fatal for the invocation it belongs to, so a single enum
//! covers the whole taxonomy:
//!
//! * **Environment**: the Ghostscript executable could not be found.
//!   Nothing the caller passes in can fix this.
//! * **Argument**: one of the request validation checks failed. The user
//!   must correct the paths and run again.
//! * **Execution**: Ghostscript ran but exited non-zero. The message is the
//!   tool's own diagnostic, forwarded verbatim.
//!
//! Spawning, timeout and configuration failures get their own variants so
//! the CLI can still tell them apart from the three main classes.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the ghostscript-console library.
#[derive(Debug, Error)]
pub enum GhostscriptError {
    // ── Environment errors ────────────────────────────────────────────────
    /// The executable is not on `PATH` or is not executable.
    #[error("Ghostscript is not installed: '{executable}' was not found on PATH")]
    ExecutableNotFound { executable: String },

    // ── Argument errors ───────────────────────────────────────────────────
    /// Input path was empty or absent.
    #[error("The input file is required")]
    InputRequired,

    /// Input and output are the same string.
    #[error("The input and output paths must differ")]
    SamePath,

    /// Input path does not resolve to anything on disk.
    #[error("The input file does not exist: `{path}`")]
    InputNotFound { path: PathBuf },

    /// Input path exists but is a directory (or another non-file entry).
    #[error("The input path is not a file: `{path}`")]
    InputNotAFile { path: PathBuf },

    /// Parent directory of the output path is missing.
    #[error("The output directory does not exist: `{dir}`")]
    OutputDirNotFound { dir: PathBuf },

    // ── Execution errors ──────────────────────────────────────────────────
    /// Ghostscript exited non-zero. `message` is its last line of output.
    #[error("{message}")]
    ExecutionFailed { exit_code: i32, message: String },

    /// The child process could not be started at all.
    #[error("Failed to start '{executable}': {source}")]
    SpawnFailed {
        executable: String,
        #[source]
        source: std::io::Error,
    },

    /// Waiting on or reading from the running child failed.
    #[error("I/O error while running '{executable}': {source}")]
    ProcessIo {
        executable: String,
        #[source]
        source: std::io::Error,
    },

    /// The child ran past the configured deadline and was killed.
    #[error("Ghostscript did not finish within {secs}s and was killed")]
    Timeout { secs: u64 },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl GhostscriptError {
    /// `true` for the request validation failures.
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            Self::InputRequired
                | Self::SamePath
                | Self::InputNotFound { .. }
                | Self::InputNotAFile { .. }
                | Self::OutputDirNotFound { .. }
        )
    }

    /// `true` when the executable could not be located.
    pub fn is_environment_error(&self) -> bool {
        matches!(self, Self::ExecutableNotFound { .. })
    }
}
