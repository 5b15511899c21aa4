//! # ghostscript-console
//!
//! Run the Ghostscript executable on a PDF with a fixed set of safe
//! `pdfwrite` defaults, from the command line or as a library.
//!
//! Ghostscript does all PDF work; this crate validates the paths, makes sure
//! `-dSAFER -dBATCH -dNOPAUSE -sDEVICE=pdfwrite` are present unless the
//! caller overrides them, runs the process, and turns its exit status into a
//! typed result.
//!
//! ## Pipeline Overview
//!
//! ```text
//! request
//!  │
//!  ├─ 1. Environment  locate `gs` on PATH
//!  ├─ 2. Validate     input present, distinct, a file; output dir exists
//!  ├─ 3. Flags        prepend missing defaults ahead of user flags
//!  ├─ 4. Invoke       run gs synchronously, capture output
//!  └─ 5. Result       output path, or the tool's last line as the error
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ghostscript_console::{run, InvocationRequest};
//!
//! let request = InvocationRequest::new("in.pdf", "out.pdf")
//!     .flag("dCompatibilityLevel=1.4");
//! let written = run(&request)?;
//! println!("File written: {}", written.display());
//! # Ok::<(), ghostscript_console::GhostscriptError>(())
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `ghostscript` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod executable;
pub mod pipeline;
pub mod runner;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{RunnerConfig, RunnerConfigBuilder, DEFAULT_EXECUTABLE};
pub use error::GhostscriptError;
pub use executable::{detect_executable, resolve_executable};
pub use pipeline::flags::{default_flags, merge_defaults, ResolvedFlags};
pub use pipeline::invoke::{build_args, invoke, InvocationResult};
pub use pipeline::validate::{validate_request, InvocationRequest, ValidatedPaths};
pub use runner::{run, CommandRunner};
