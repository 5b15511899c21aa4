//! Pipeline stages for one Ghostscript invocation.
//!
//! Each submodule implements exactly one step and is testable on its own.
//!
//! ## Data Flow
//!
//! ```text
//! request ──▶ validate ──▶ flags ──▶ invoke
//! (CLI args)   (paths)     (defaults) (child process)
//! ```
//!
//! 1. [`validate`]: fail fast on missing, identical, or unusable paths
//! 2. [`flags`]: prepend the safety defaults the caller did not supply
//! 3. [`invoke`]: run the executable synchronously and capture its output

pub mod flags;
pub mod invoke;
pub mod validate;
