//! Runner configuration.
//!
//! [`RunnerConfig`] holds the two knobs that are not part of a single
//! request: which executable to run and how long to wait for it. Built via
//! [`RunnerConfig::builder()`] or [`RunnerConfig::default()`].

use crate::error::GhostscriptError;
use serde::Serialize;
use std::time::Duration;

/// Executable name looked up on `PATH` when nothing else is configured.
pub const DEFAULT_EXECUTABLE: &str = "gs";

/// Configuration shared by every invocation of a [`crate::CommandRunner`].
///
/// # Example
/// ```rust
/// use ghostscript_console::RunnerConfig;
///
/// let config = RunnerConfig::builder()
///     .executable("gswin64c")
///     .timeout_secs(300)
///     .build()
///     .unwrap();
/// assert_eq!(config.executable, "gswin64c");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunnerConfig {
    /// Executable name or path. Default: `gs`.
    ///
    /// A bare name is resolved through `PATH`; anything containing a path
    /// separator is used as-is.
    pub executable: String,

    /// Kill Ghostscript if it runs longer than this. Default: no limit.
    pub timeout_secs: Option<u64>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            executable: DEFAULT_EXECUTABLE.to_string(),
            timeout_secs: None,
        }
    }
}

impl RunnerConfig {
    /// Create a new builder for `RunnerConfig`.
    pub fn builder() -> RunnerConfigBuilder {
        RunnerConfigBuilder {
            config: Self::default(),
        }
    }

    /// The configured timeout as a [`Duration`].
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Builder for [`RunnerConfig`].
#[derive(Debug)]
pub struct RunnerConfigBuilder {
    config: RunnerConfig,
}

impl RunnerConfigBuilder {
    pub fn executable(mut self, executable: impl Into<String>) -> Self {
        self.config.executable = executable.into();
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = Some(secs);
        self
    }

    pub fn maybe_timeout_secs(mut self, secs: Option<u64>) -> Self {
        self.config.timeout_secs = secs;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<RunnerConfig, GhostscriptError> {
        let c = &self.config;
        if c.executable.trim().is_empty() {
            return Err(GhostscriptError::InvalidConfig(
                "executable must not be empty".into(),
            ));
        }
        if c.timeout_secs == Some(0) {
            return Err(GhostscriptError::InvalidConfig(
                "timeout must be at least 1 second".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = RunnerConfig::default();
        assert_eq!(c.executable, "gs");
        assert_eq!(c.timeout(), None);
    }

    #[test]
    fn builder_sets_fields() {
        let c = RunnerConfig::builder()
            .executable("/opt/gs/bin/gs")
            .timeout_secs(30)
            .build()
            .unwrap();
        assert_eq!(c.executable, "/opt/gs/bin/gs");
        assert_eq!(c.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn serializes_for_debug_log() {
        let c = RunnerConfig::builder().timeout_secs(5).build().unwrap();
        assert_eq!(
            serde_json::to_string(&c).unwrap(),
            r#"{"executable":"gs","timeout_secs":5}"#
        );
    }

    #[test]
    fn empty_executable_rejected() {
        let err = RunnerConfig::builder().executable("  ").build().unwrap_err();
        assert!(matches!(err, GhostscriptError::InvalidConfig(_)));
    }

    #[test]
    fn zero_timeout_rejected() {
        let err = RunnerConfig::builder()
            .maybe_timeout_secs(Some(0))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("timeout"));
    }
}
