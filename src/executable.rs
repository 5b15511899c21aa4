//! Locating the Ghostscript executable.
//!
//! Lookup is delegated to the `which` crate, which follows the platform's
//! own rules: `PATH` plus the executable permission bit on unix, `PATH`
//! plus `PATHEXT` on Windows (the same search `where` performs). Names that
//! already contain a path separator are checked in place.

use std::path::PathBuf;
use tracing::debug;

/// Resolve `executable` to an absolute path, or `None` if it cannot be run.
pub fn resolve_executable(executable: &str) -> Option<PathBuf> {
    if executable.trim().is_empty() {
        return None;
    }

    match which::which(executable) {
        Ok(path) if path.is_file() => {
            debug!("Resolved {} to {}", executable, path.display());
            Some(path)
        }
        Ok(path) => {
            debug!("{} resolved to non-file {}", executable, path.display());
            None
        }
        Err(e) => {
            debug!("Could not resolve {}: {}", executable, e);
            None
        }
    }
}

/// Returns `true` when `executable` resolves to something runnable.
///
/// Never fails; the caller decides whether a missing executable is fatal.
pub fn detect_executable(executable: &str) -> bool {
    resolve_executable(executable).is_some()
}
