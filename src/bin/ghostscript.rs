//! CLI binary for ghostscript-console.
//!
//! A thin shim over the library crate that maps CLI flags to an
//! `InvocationRequest` and a `RunnerConfig`, runs it, and prints the result.

use anyhow::{Context, Result};
use clap::Parser;
use ghostscript_console::{CommandRunner, GhostscriptError, InvocationRequest, RunnerConfig};
use std::io::{self, IsTerminal};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

// ── Exit codes ───────────────────────────────────────────────────────────────

const EXIT_EXECUTION: u8 = 1;
const EXIT_ARGUMENT: u8 = 2;
const EXIT_ENVIRONMENT: u8 = 3;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn red(s: &str) -> String {
    if io::stderr().is_terminal() {
        format!("\x1b[31m{s}\x1b[0m")
    } else {
        s.to_string()
    }
}

const AFTER_HELP: &str = r#"DEFAULTS:
  The following parameters are set automatically unless already given:
    -dSAFER -dBATCH -dNOPAUSE -sDEVICE=pdfwrite

  A flag starting with dSAFER, dNOPAUSE or sDEVICE replaces the matching
  default; dBATCH is only replaced by exactly dBATCH.

EXAMPLES:
  # Plain rewrite through pdfwrite
  ghostscript /full/input/path/in.pdf /full/output/path/out.pdf

  # Downgrade to PDF 1.4
  ghostscript -g 'sDEVICE=pdfwrite' --gs='dCompatibilityLevel=1.4' in.pdf out.pdf

  # Use a specific Ghostscript binary and give up after 5 minutes
  ghostscript --gs-bin /opt/gs/bin/gs --timeout 300 in.pdf out.pdf

EXIT STATUS:
  0  file written
  1  Ghostscript failed (its last line of output is printed)
  2  invalid arguments
  3  Ghostscript is not installed

ENVIRONMENT VARIABLES:
  GHOSTSCRIPT_BIN      Executable to run instead of `gs`
  GHOSTSCRIPT_TIMEOUT  Timeout in seconds
  RUST_LOG             Log filter, e.g. `ghostscript_console=debug`

More about the Ghostscript CLI options:
  https://www.ghostscript.com/doc/current/Use.htm#Options
"#;

/// A CLI wrapper to the Ghostscript executable.
#[derive(Parser, Debug)]
#[command(
    name = "ghostscript",
    version,
    about = "A CLI wrapper to the Ghostscript executable",
    long_about = "Run Ghostscript on a PDF file. The parameters -dSAFER -dBATCH -dNOPAUSE \
-sDEVICE=pdfwrite are added automatically when not explicitly included.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// The full path filename of the source PDF file.
    #[arg(value_name = "INPUT_FILE")]
    input_file: String,

    /// The full path filename of the PDF output file.
    #[arg(value_name = "OUTPUT_FILE")]
    output_file: String,

    /// Any valid Ghostscript parameter, without the leading dash. Repeatable.
    #[arg(short = 'g', long = "gs", value_name = "FLAG", allow_hyphen_values = true)]
    gs: Vec<String>,

    /// Ghostscript executable name or path.
    #[arg(long, env = "GHOSTSCRIPT_BIN", default_value = ghostscript_console::DEFAULT_EXECUTABLE)]
    gs_bin: String,

    /// Kill Ghostscript after this many seconds.
    #[arg(long, env = "GHOSTSCRIPT_TIMEOUT",
          value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Only log errors. The confirmation line is still printed.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // stdout carries only the confirmation line; logs go to stderr.
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", red("error:"), err);
            ExitCode::from(exit_code_for(&err))
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = RunnerConfig::builder()
        .executable(cli.gs_bin.clone())
        .maybe_timeout_secs(cli.timeout)
        .build()
        .context("Invalid configuration")?;

    let request =
        InvocationRequest::new(cli.input_file.clone(), cli.output_file.clone()).flags(&cli.gs);

    CommandRunner::new(config).run(&request)?;

    println!("File written: {}", cli.output_file);
    Ok(())
}

/// Map the root cause of a failure to the process exit status.
fn exit_code_for(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<GhostscriptError>() {
        Some(e) if e.is_environment_error() => EXIT_ENVIRONMENT,
        Some(e) if e.is_argument_error() => EXIT_ARGUMENT,
        Some(GhostscriptError::InvalidConfig(_)) => EXIT_ARGUMENT,
        _ => EXIT_EXECUTION,
    }
}
