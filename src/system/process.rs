//! Guarded process launching
//!
//! Both launch paths check the platform first: on a development
//! workstation (see [`super::platform::not_pi`]) nothing is executed —
//! [`exec_sync`] returns an empty capture and [`spawn`] hands back an
//! [`InertProcess`] that satisfies the same [`ProcessHandle`] surface as a
//! live child. Dependent applications run unmodified on either host.

use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::process::{Child, Command};

use crate::errors::{PihostError, Result};
use crate::logger::Logger;
use crate::system::platform;
use crate::log_debug;

pub type OutputStream = Box<dyn AsyncRead + Send + Unpin>;
pub type InputStream = Box<dyn AsyncWrite + Send + Unpin>;

/// Capability surface shared by live and inert child processes
#[async_trait]
pub trait ProcessHandle: Send {
    /// OS process id; `None` for inert handles and reaped children
    fn id(&self) -> Option<u32>;

    /// Forcefully terminate the child. No-op on inert handles.
    fn kill(&mut self) -> Result<()>;

    /// Write a message line to the child's standard input.
    /// No-op on inert handles or after [`disconnect`](Self::disconnect).
    async fn send(&mut self, message: &str) -> Result<()>;

    /// Close the child's standard input
    fn disconnect(&mut self);

    /// Child stdout as an async stream; inert handles yield a stream that
    /// is immediately at end-of-stream. Takeable once.
    fn take_stdout(&mut self) -> Option<OutputStream>;

    fn take_stderr(&mut self) -> Option<OutputStream>;

    fn take_stdin(&mut self) -> Option<InputStream>;

    /// Exit status if the child has finished, without blocking.
    /// Inert handles never finish.
    fn try_wait(&mut self) -> Result<Option<ExitStatus>>;
}

/// Handle over a real child process
pub struct LiveProcess {
    child: Child,
}

#[async_trait]
impl ProcessHandle for LiveProcess {
    fn id(&self) -> Option<u32> {
        self.child.id()
    }

    fn kill(&mut self) -> Result<()> {
        self.child.start_kill().map_err(|e| {
            PihostError::signal_operation(format!("failed to kill process: {}", e))
        })
    }

    async fn send(&mut self, message: &str) -> Result<()> {
        let Some(stdin) = self.child.stdin.as_mut() else {
            return Ok(());
        };
        stdin
            .write_all(message.as_bytes())
            .await
            .map_err(|e| PihostError::process_io(format!("failed to send to process: {}", e)))?;
        stdin
            .write_all(b"\n")
            .await
            .map_err(|e| PihostError::process_io(format!("failed to send to process: {}", e)))?;
        stdin
            .flush()
            .await
            .map_err(|e| PihostError::process_io(format!("failed to send to process: {}", e)))
    }

    fn disconnect(&mut self) {
        // Dropping the pipe delivers EOF to the child
        self.child.stdin.take();
    }

    fn take_stdout(&mut self) -> Option<OutputStream> {
        self.child
            .stdout
            .take()
            .map(|s| Box::new(s) as OutputStream)
    }

    fn take_stderr(&mut self) -> Option<OutputStream> {
        self.child
            .stderr
            .take()
            .map(|s| Box::new(s) as OutputStream)
    }

    fn take_stdin(&mut self) -> Option<InputStream> {
        self.child.stdin.take().map(|s| Box::new(s) as InputStream)
    }

    fn try_wait(&mut self) -> Result<Option<ExitStatus>> {
        self.child
            .try_wait()
            .map_err(|e| PihostError::process_wait(format!("failed to poll process: {}", e)))
    }
}

/// Stand-in process handle for development workstations. Streams report
/// end-of-stream / discard immediately; control operations do nothing.
pub struct InertProcess {
    stdout: Option<OutputStream>,
    stderr: Option<OutputStream>,
    stdin: Option<InputStream>,
}

impl InertProcess {
    pub fn new() -> Self {
        InertProcess {
            stdout: Some(Box::new(tokio::io::empty())),
            stderr: Some(Box::new(tokio::io::empty())),
            stdin: Some(Box::new(tokio::io::sink())),
        }
    }
}

impl Default for InertProcess {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProcessHandle for InertProcess {
    fn id(&self) -> Option<u32> {
        None
    }

    fn kill(&mut self) -> Result<()> {
        Ok(())
    }

    async fn send(&mut self, _message: &str) -> Result<()> {
        Ok(())
    }

    fn disconnect(&mut self) {}

    fn take_stdout(&mut self) -> Option<OutputStream> {
        self.stdout.take()
    }

    fn take_stderr(&mut self) -> Option<OutputStream> {
        self.stderr.take()
    }

    fn take_stdin(&mut self) -> Option<InputStream> {
        self.stdin.take()
    }

    fn try_wait(&mut self) -> Result<Option<ExitStatus>> {
        Ok(None)
    }
}

/// Working directory and extra environment for [`spawn`]
#[derive(Debug, Clone, Default)]
pub struct SpawnOptions {
    pub cwd: Option<PathBuf>,
    pub env: Vec<(String, String)>,
}

/// Run a command line synchronously and capture its standard output.
///
/// On a development workstation nothing is executed and the capture is
/// empty. Spawn failures and non-zero exits propagate to the caller.
/// Blocks until the command finishes; there is no timeout.
pub fn exec_sync(cmd: &str, logger: &Logger) -> Result<String> {
    log_debug!(logger, "exec_sync('{}')", cmd);

    if platform::not_pi() {
        return Ok(String::new());
    }

    let output = std::process::Command::new("sh")
        .arg("-c")
        .arg(cmd)
        .output()
        .map_err(|e| PihostError::command_failed(format!("failed to run '{}': {}", cmd, e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(PihostError::command_failed(format!(
            "'{}' exited with {}: {}",
            cmd,
            output.status,
            stderr.trim()
        )));
    }

    String::from_utf8(output.stdout).map_err(|e| {
        PihostError::command_failed(format!("'{}' produced non-UTF-8 output: {}", cmd, e))
    })
}

/// Launch a child process and return its handle immediately.
///
/// On a development workstation no process is started and the returned
/// handle is an [`InertProcess`]. Live children get piped stdio so output
/// arrives through the handle's async streams.
pub fn spawn(
    cmd: &str,
    args: &[&str],
    options: SpawnOptions,
    logger: &Logger,
) -> Result<Box<dyn ProcessHandle>> {
    log_debug!(logger, "spawn('{}', {:?}, {:?})", cmd, args, options);

    if platform::not_pi() {
        return Ok(Box::new(InertProcess::new()));
    }

    let mut command = Command::new(cmd);
    command
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(dir) = &options.cwd {
        command.current_dir(dir);
    }
    for (key, value) in &options.env {
        command.env(key, value);
    }

    let child = command
        .spawn()
        .map_err(|e| PihostError::process_spawn(format!("failed to spawn '{}': {}", cmd, e)))?;

    Ok(Box::new(LiveProcess { child }))
}
