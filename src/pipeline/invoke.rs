//! Running Ghostscript as a child process.
//!
//! The command line is built as discrete argv entries and handed straight
//! to [`std::process::Command`]; no shell is involved, so quotes, spaces or
//! `$(...)` in a file name reach Ghostscript as literal bytes.
//!
//! ```text
//! gs -dSAFER -dBATCH -dNOPAUSE -sDEVICE=pdfwrite ... -sOutputFile=<out> <in>
//! ```
//!
//! stdout and stderr are drained on two scoped threads while the calling
//! thread waits on the child, so a chatty Ghostscript cannot stall on a full
//! pipe. Nothing is streamed back to the caller; the result is returned once
//! the process has exited.
//!
//! On unix the child leads its own process group. When it has to be killed
//! the whole group goes, so a wrapper script's `gs` cannot keep the pipes
//! (and the reader threads) alive past the deadline.

use crate::error::GhostscriptError;
use crate::pipeline::flags::ResolvedFlags;
use serde::Serialize;
use std::ffi::OsString;
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// How often a child with a deadline is polled for exit.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Exit status and captured output of one Ghostscript run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct InvocationResult {
    /// Process exit code; `-1` when the child was terminated by a signal.
    pub exit_code: i32,
    pub stdout_lines: Vec<String>,
    pub stderr_lines: Vec<String>,
}

impl InvocationResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// The line Ghostscript ends on when it fails.
    ///
    /// Last non-blank stdout line, falling back to stderr when stdout is
    /// empty.
    pub fn diagnostic(&self) -> Option<&str> {
        last_non_blank(&self.stdout_lines).or_else(|| last_non_blank(&self.stderr_lines))
    }
}

fn last_non_blank(lines: &[String]) -> Option<&str> {
    lines
        .iter()
        .rev()
        .map(|l| l.trim())
        .find(|l| !l.is_empty())
}

/// Build the argv that follows the executable name.
///
/// Each flag gets a single leading dash, the output is passed as
/// `-sOutputFile=<path>` and the input comes last as a positional argument.
pub fn build_args(flags: &ResolvedFlags, input: &Path, output: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = flags
        .iter()
        .map(|f| OsString::from(format!("-{f}")))
        .collect();

    let mut output_arg = OsString::from("-sOutputFile=");
    output_arg.push(output.as_os_str());
    args.push(output_arg);

    args.push(input.as_os_str().to_os_string());
    args
}

/// Run `executable` with the resolved flags and block until it exits.
///
/// A non-zero exit is *not* an error here; it is reported through
/// [`InvocationResult::exit_code`] and mapped by the runner. Errors are
/// reserved for failing to start, wait on, or time out the process.
pub fn invoke(
    executable: &Path,
    flags: &ResolvedFlags,
    input: &Path,
    output: &Path,
    timeout: Option<Duration>,
) -> Result<InvocationResult, GhostscriptError> {
    let args = build_args(flags, input, output);
    let exe_name = executable.display().to_string();
    debug!("Spawning {} {:?}", exe_name, args);

    let mut command = Command::new(executable);
    command
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.process_group(0);
    }

    let mut child = command
        .spawn()
        .map_err(|source| GhostscriptError::SpawnFailed {
            executable: exe_name.clone(),
            source,
        })?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let (status, stdout_lines, stderr_lines) = std::thread::scope(|s| {
        let out = s.spawn(move || read_lines(stdout));
        let err = s.spawn(move || read_lines(stderr));

        let status = wait_for(&mut child, timeout, &exe_name);

        // Readers finish once every process holding the pipes is gone.
        let stdout_lines = out.join().unwrap_or_else(|_| Ok(Vec::new()));
        let stderr_lines = err.join().unwrap_or_else(|_| Ok(Vec::new()));
        (status, stdout_lines, stderr_lines)
    });

    let status = status?;
    let io_err = |source: std::io::Error| {
        warn!("Reading output of {} failed: {}", exe_name, source);
        GhostscriptError::ProcessIo {
            executable: exe_name.clone(),
            source,
        }
    };
    let result = InvocationResult {
        exit_code: status.code().unwrap_or(-1),
        stdout_lines: stdout_lines.map_err(io_err)?,
        stderr_lines: stderr_lines.map_err(io_err)?,
    };
    debug!(
        "{} exited with {} ({} stdout / {} stderr lines)",
        exe_name,
        result.exit_code,
        result.stdout_lines.len(),
        result.stderr_lines.len()
    );
    Ok(result)
}

fn wait_for(
    child: &mut Child,
    timeout: Option<Duration>,
    exe_name: &str,
) -> Result<ExitStatus, GhostscriptError> {
    let io_err = |source: std::io::Error| GhostscriptError::ProcessIo {
        executable: exe_name.to_string(),
        source,
    };

    let Some(timeout) = timeout else {
        return child.wait().map_err(io_err);
    };

    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) => {}
            Err(e) => {
                terminate(child, exe_name);
                return Err(io_err(e));
            }
        }
        if Instant::now() >= deadline {
            warn!("{} exceeded {:?}; killing it", exe_name, timeout);
            terminate(child, exe_name);
            return Err(GhostscriptError::Timeout {
                secs: timeout.as_secs(),
            });
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}

/// Kill the child and everything it started, then reap it.
fn terminate(child: &mut Child, exe_name: &str) {
    #[cfg(unix)]
    {
        use nix::sys::signal::{killpg, Signal};
        use nix::unistd::Pid;

        let pgid = Pid::from_raw(child.id() as i32);
        if let Err(e) = killpg(pgid, Signal::SIGKILL) {
            debug!("killpg({}) for {} failed: {}", pgid, exe_name, e);
        }
    }
    // The child may have exited already; kill then only fails with InvalidInput.
    if let Err(e) = child.kill() {
        debug!("kill {} failed: {}", exe_name, e);
    }
    if let Err(e) = child.wait() {
        warn!("Reaping {} failed: {}", exe_name, e);
    }
}

fn read_lines<R: Read>(pipe: Option<R>) -> std::io::Result<Vec<String>> {
    let Some(mut pipe) = pipe else {
        return Ok(Vec::new());
    };
    let mut buf = Vec::new();
    pipe.read_to_end(&mut buf)?;
    Ok(String::from_utf8_lossy(&buf)
        .lines()
        .map(|l| l.trim_end_matches('\r').to_string())
        .collect())
}
