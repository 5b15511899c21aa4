//! Request validation: reject bad paths before Ghostscript is started.
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. input present and non-empty
//! 2. input and output differ (exact string comparison)
//! 3. input exists
//! 4. input is a regular file
//! 5. output's parent directory exists
//!
//! The same-path check compares strings, not canonical paths, so `a.pdf`
//! and `./a.pdf` count as different.

use crate::error::GhostscriptError;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One input → output job as given on the command line.
///
/// The input is optional so that an absent argument and an empty one both
/// reach validation and fail the same way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvocationRequest {
    pub input_path: Option<String>,
    pub output_path: String,
    /// Ghostscript switches without their leading dash, in user order.
    pub extra_flags: Vec<String>,
}

impl InvocationRequest {
    pub fn new(input_path: impl Into<String>, output_path: impl Into<String>) -> Self {
        Self {
            input_path: Some(input_path.into()),
            output_path: output_path.into(),
            extra_flags: Vec::new(),
        }
    }

    /// Append one Ghostscript switch, e.g. `dCompatibilityLevel=1.4`.
    pub fn flag(mut self, flag: impl Into<String>) -> Self {
        self.extra_flags.push(flag.into());
        self
    }

    pub fn flags<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_flags.extend(flags.into_iter().map(Into::into));
        self
    }

    /// Run [`validate_request`] on this request's paths.
    pub fn validate(&self) -> Result<ValidatedPaths, GhostscriptError> {
        validate_request(self.input_path.as_deref(), &self.output_path)
    }
}

/// Paths that passed every check, ready to hand to the invoke stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPaths {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Validate an input/output pair, failing fast on the first problem.
pub fn validate_request(
    input_path: Option<&str>,
    output_path: &str,
) -> Result<ValidatedPaths, GhostscriptError> {
    let input_str = match input_path {
        Some(s) if !s.is_empty() => s,
        _ => return Err(GhostscriptError::InputRequired),
    };

    if input_str == output_path {
        return Err(GhostscriptError::SamePath);
    }

    let input = PathBuf::from(input_str);
    if !input.exists() {
        return Err(GhostscriptError::InputNotFound { path: input });
    }
    if !input.is_file() {
        return Err(GhostscriptError::InputNotAFile { path: input });
    }

    let output = PathBuf::from(output_path);
    let dir = output_dir(&output);
    if !dir.exists() {
        return Err(GhostscriptError::OutputDirNotFound { dir });
    }

    debug!(
        "Validated request: {} -> {}",
        input.display(),
        output.display()
    );
    Ok(ValidatedPaths { input, output })
}

/// Directory that will receive `output`. A bare file name lives in `.`.
fn output_dir(output: &Path) -> PathBuf {
    match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
