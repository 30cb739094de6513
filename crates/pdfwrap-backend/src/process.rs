//! External process execution.
//!
//! Every backend call goes through a [`ProcessRunner`]: the adapters build an
//! [`Invocation`] (binary, argument vector, timeout) and get back the
//! captured [`ProcessOutput`]. Arguments are passed as a vector, never through
//! a shell, so paths and metadata values need no quoting.
//!
//! [`Tool`] binds a binary path to a runner and turns unsuccessful runs into
//! [`PdfError::Execution`] with both streams attached.

use std::ffi::OsString;
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::{Duration, Instant};

use pdfwrap_core::PdfError;
use tracing::{debug, warn};

use crate::error::BackendError;
use crate::scratch::ensure_file_exists;

/// Default upper bound on a single tool run.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

const POLL_INTERVAL: Duration = Duration::from_millis(100);

// How long output streams may stay open after the deadline. A grandchild
// that inherited the pipes can keep them open past the tool's own exit.
const READER_GRACE: Duration = Duration::from_secs(1);

/// A single tool run: binary, arguments, and time limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub timeout: Duration,
}

impl Invocation {
    /// Arguments as lossy UTF-8 strings, for logs and assertions.
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Captured result of a finished (or killed) tool run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code; `None` if the process was killed by a signal or timed out.
    pub code: Option<i32>,
    pub success: bool,
    pub timed_out: bool,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    /// A successful run with the given standard output.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            success: true,
            stdout: stdout.into(),
            ..Self::default()
        }
    }

    /// A failed run with the given exit code and standard error.
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stderr: stderr.into(),
            ..Self::default()
        }
    }
}

/// Runs external processes.
///
/// The production implementation is [`SystemRunner`]; tests substitute a
/// scripted runner to check argument vectors without the real tools.
pub trait ProcessRunner: Send + Sync {
    /// Run `invocation` to completion, capturing both output streams.
    ///
    /// Returns `Err` only if the process could not be started or waited on;
    /// a non-zero exit or a timeout is reported through [`ProcessOutput`].
    fn run(&self, invocation: &Invocation) -> Result<ProcessOutput, BackendError>;
}

/// [`ProcessRunner`] backed by [`std::process::Command`].
///
/// Both streams are drained on reader threads while the child is polled, so
/// a chatty tool cannot block on a full pipe. A child still running at its
/// deadline is killed. Streams still open shortly after the deadline are
/// abandoned and reported empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<ProcessOutput, BackendError> {
        let mut child = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| BackendError::Spawn {
                program: invocation.program.clone(),
                source,
            })?;

        let stdout_reader = spawn_reader(child.stdout.take());
        let stderr_reader = spawn_reader(child.stderr.take());

        let started = Instant::now();
        let deadline = started + invocation.timeout;
        let (status, timed_out) = loop {
            if let Some(status) = child.try_wait()? {
                break (Some(status), false);
            }
            if started.elapsed() >= invocation.timeout {
                warn!(
                    program = %invocation.program.display(),
                    timeout_secs = invocation.timeout.as_secs(),
                    "backend timed out, killing"
                );
                if let Err(e) = child.kill() {
                    warn!(
                        program = %invocation.program.display(),
                        error = %e,
                        "failed to kill backend"
                    );
                }
                child.wait()?;
                break (None, true);
            }
            thread::sleep(POLL_INTERVAL);
        };

        let collect_by = deadline.max(Instant::now()) + READER_GRACE;
        let stdout = collect(&stdout_reader, collect_by, "stdout");
        let stderr = collect(&stderr_reader, collect_by, "stderr");

        Ok(ProcessOutput {
            code: status.and_then(|s| s.code()),
            success: status.is_some_and(|s| s.success()),
            timed_out,
            stdout,
            stderr,
        })
    }
}

fn spawn_reader<R: Read + Send + 'static>(stream: Option<R>) -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(drain(stream));
    });
    rx
}

fn collect(reader: &mpsc::Receiver<String>, by: Instant, stream: &str) -> String {
    match reader.recv_timeout(by.saturating_duration_since(Instant::now())) {
        Ok(text) => text,
        Err(_) => {
            warn!(stream, "backend output still open after exit, ignoring it");
            String::new()
        }
    }
}

fn drain<R: Read>(stream: Option<R>) -> String {
    let mut buf = Vec::new();
    if let Some(mut stream) = stream {
        let _ = stream.read_to_end(&mut buf);
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// A tool binary bound to a runner and timeout.
#[derive(Clone)]
pub struct Tool {
    name: &'static str,
    binary: PathBuf,
    runner: Arc<dyn ProcessRunner>,
    timeout: Duration,
}

impl Tool {
    /// Bind `binary` to `runner`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::FileNotFound`] if `binary` does not exist.
    pub fn new(
        name: &'static str,
        binary: impl Into<PathBuf>,
        runner: Arc<dyn ProcessRunner>,
    ) -> Result<Self, PdfError> {
        let binary = binary.into();
        ensure_file_exists(&binary, &format!("{name} binary"))?;
        Ok(Self {
            name,
            binary,
            runner,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn invocation(&self, args: Vec<OsString>) -> Invocation {
        Invocation {
            program: self.binary.clone(),
            args,
            timeout: self.timeout,
        }
    }

    /// Run the tool and return its output whatever the exit status.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::Execution`] only if the process could not be
    /// spawned.
    pub fn run_unchecked(&self, args: Vec<OsString>) -> Result<ProcessOutput, PdfError> {
        let invocation = self.invocation(args);
        debug!(backend = self.name, command = %invocation, "running backend");
        let started = Instant::now();
        let output = self.runner.run(&invocation)?;
        debug!(
            backend = self.name,
            code = ?output.code,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "backend finished"
        );
        Ok(output)
    }

    /// Run the tool, failing unless it exits successfully.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::Execution`] carrying both streams on a non-zero
    /// exit, a timeout, or a spawn failure.
    pub fn run(&self, args: Vec<OsString>) -> Result<ProcessOutput, PdfError> {
        let output = self.run_unchecked(args)?;
        if output.success {
            Ok(output)
        } else {
            Err(self.failure(&output))
        }
    }

    /// Describe an unsuccessful run as an [`PdfError::Execution`].
    pub fn failure(&self, output: &ProcessOutput) -> PdfError {
        let message = if output.timed_out {
            format!(
                "{} timed out after {}s",
                self.name,
                self.timeout.as_secs()
            )
        } else {
            match output.code {
                Some(code) => format!("{} exited with status {code}", self.name),
                None => format!("{} was terminated by a signal", self.name),
            }
        };
        PdfError::execution(message, output.stderr.clone(), output.stdout.clone())
    }
}

impl fmt::Debug for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("binary", &self.binary)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Build an argument vector from heterogeneous string-like values.
macro_rules! args {
    ($($arg:expr),* $(,)?) => {
        vec![$(::std::ffi::OsString::from($arg)),*]
    };
}
pub(crate) use args;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Canned {
        output: ProcessOutput,
        seen: Mutex<Vec<Invocation>>,
    }

    impl ProcessRunner for Canned {
        fn run(&self, invocation: &Invocation) -> Result<ProcessOutput, BackendError> {
            self.seen.lock().unwrap().push(invocation.clone());
            Ok(self.output.clone())
        }
    }

    fn tool_with(output: ProcessOutput) -> (Tool, Arc<Canned>, tempfile::NamedTempFile) {
        let binary = tempfile::NamedTempFile::new().unwrap();
        let runner = Arc::new(Canned {
            output,
            seen: Mutex::new(Vec::new()),
        });
        let tool = Tool::new("pdftk", binary.path(), runner.clone()).unwrap();
        (tool, runner, binary)
    }

    #[test]
    fn missing_binary_is_file_not_found() {
        let err = Tool::new("pdfcpu", "/nonexistent/pdfcpu", Arc::new(SystemRunner)).unwrap_err();
        assert!(err.is_file_not_found());
        assert!(err.to_string().contains("pdfcpu binary"));
    }

    #[test]
    fn run_passes_args_and_timeout() {
        let (tool, runner, binary) = tool_with(ProcessOutput::ok("done"));
        let tool = tool.with_timeout(Duration::from_secs(7));
        let output = tool.run(args!["a.pdf", "dump_data_utf8"]).unwrap();
        assert_eq!(output.stdout, "done");

        let seen = runner.seen.lock().unwrap();
        assert_eq!(seen[0].program, binary.path());
        assert_eq!(seen[0].args_lossy(), vec!["a.pdf", "dump_data_utf8"]);
        assert_eq!(seen[0].timeout, Duration::from_secs(7));
    }

    #[test]
    fn failure_carries_both_streams() {
        let output = ProcessOutput {
            stdout: "partial".to_string(),
            ..ProcessOutput::failed(1, "Error: Unable to find file.")
        };
        let (tool, _runner, _binary) = tool_with(output);
        let err = tool.run(args!["x.pdf"]).unwrap_err();
        assert_eq!(err.to_string(), "pdftk exited with status 1");
        assert_eq!(err.backend_stderr(), Some("Error: Unable to find file."));
        assert_eq!(err.backend_stdout(), Some("partial"));
    }

    #[test]
    fn timeout_is_reported() {
        let output = ProcessOutput {
            timed_out: true,
            ..ProcessOutput::default()
        };
        let (tool, _runner, _binary) = tool_with(output);
        let err = tool
            .with_timeout(Duration::from_secs(2))
            .run(args!["x.pdf"])
            .unwrap_err();
        assert_eq!(err.to_string(), "pdftk timed out after 2s");
    }

    #[test]
    fn run_unchecked_returns_failed_output() {
        let (tool, _runner, _binary) = tool_with(ProcessOutput::failed(2, "nope"));
        let output = tool.run_unchecked(args!["x.pdf"]).unwrap();
        assert!(!output.success);
        assert_eq!(output.code, Some(2));
    }

    #[test]
    fn invocation_display_joins_args() {
        let invocation = Invocation {
            program: PathBuf::from("/usr/bin/pdfcpu"),
            args: args!["merge", "out.pdf", "a.pdf"],
            timeout: DEFAULT_TIMEOUT,
        };
        assert_eq!(invocation.to_string(), "/usr/bin/pdfcpu merge out.pdf a.pdf");
    }

    #[cfg(unix)]
    #[test]
    fn system_runner_captures_streams() {
        let invocation = Invocation {
            program: PathBuf::from("/bin/sh"),
            args: args!["-c", "echo out; echo err >&2; exit 3"],
            timeout: Duration::from_secs(10),
        };
        let output = SystemRunner.run(&invocation).unwrap();
        assert!(!output.success);
        assert_eq!(output.code, Some(3));
        assert_eq!(output.stdout.trim(), "out");
        assert_eq!(output.stderr.trim(), "err");
    }

    #[cfg(unix)]
    #[test]
    fn system_runner_kills_on_timeout() {
        let invocation = Invocation {
            program: PathBuf::from("/bin/sh"),
            args: args!["-c", "exec sleep 5"],
            timeout: Duration::from_millis(200),
        };
        let started = Instant::now();
        let output = SystemRunner.run(&invocation).unwrap();
        assert!(output.timed_out);
        assert!(!output.success);
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[cfg(unix)]
    #[test]
    fn timeout_not_held_up_by_grandchild() {
        let invocation = Invocation {
            program: PathBuf::from("/bin/sh"),
            args: args!["-c", "sleep 6 & sleep 6"],
            timeout: Duration::from_millis(200),
        };
        let started = Instant::now();
        let output = SystemRunner.run(&invocation).unwrap();
        assert!(output.timed_out);
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[cfg(unix)]
    #[test]
    fn exit_not_held_up_by_background_grandchild() {
        let invocation = Invocation {
            program: PathBuf::from("/bin/sh"),
            args: args!["-c", "sleep 6 & exit 0"],
            timeout: Duration::from_millis(500),
        };
        let started = Instant::now();
        let output = SystemRunner.run(&invocation).unwrap();
        assert!(output.success);
        assert!(!output.timed_out);
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn system_runner_spawn_failure() {
        let invocation = Invocation {
            program: PathBuf::from("/nonexistent/tool"),
            args: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        };
        let err = SystemRunner.run(&invocation).unwrap_err();
        assert!(matches!(err, BackendError::Spawn { .. }));
    }
}
