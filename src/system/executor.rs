// src/system/executor.rs

//! Spawning the resolved shell and capturing its output.

use crate::{
    constants::CHUNK_SIZE,
    core::{color, template::TemplateError},
    models::{Origin, ProcessOutput},
    system::resolver::ResolvedShell,
};
use std::io;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::process::Command;

/// Ways a single command invocation can fail.
#[derive(Error, Debug)]
pub enum ExecutionError {
    /// The child exited with a non-zero code; carries the full result.
    #[error("{}", describe_failure(.0))]
    Failed(Box<ProcessOutput>),
    /// The interpreter could not be started.
    #[error("Command '{command}' could not be started: {source}")]
    Spawn {
        /// The built command.
        command: String,
        /// Underlying spawn error.
        #[source]
        source: io::Error,
    },
    /// Reading a pipe or waiting for the child failed.
    #[error("Failed to read the output of '{command}': {source}")]
    Stream {
        /// The built command.
        command: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The template could not be filled.
    #[error(transparent)]
    Template(#[from] TemplateError),
}

impl ExecutionError {
    /// The result carried by a non-zero exit.
    pub fn output(&self) -> Option<&ProcessOutput> {
        match self {
            Self::Failed(output) => Some(&**output),
            _ => None,
        }
    }

    /// Recovers the result of a non-zero exit; any other error is handed back.
    pub fn into_output(self) -> Result<ProcessOutput, Self> {
        match self {
            Self::Failed(output) => Ok(*output),
            other => Err(other),
        }
    }
}

/// Human-readable meaning of well-known shell exit codes.
pub fn exit_code_info(code: i32) -> Option<&'static str> {
    let info = match code {
        1 => "General error",
        2 => "Misuse of shell builtins",
        126 => "Invoked command cannot execute",
        127 => "Command not found",
        128 => "Invalid exit argument",
        129 => "Hangup",
        130 => "Interrupt",
        131 => "Quit and dump core",
        132 => "Illegal instruction",
        133 => "Trace/breakpoint trap",
        134 => "Process aborted",
        135 => "Bus error: \"access to undefined portion of memory object\"",
        136 => "Floating point exception: \"erroneous arithmetic operation\"",
        137 => "Kill (terminate immediately)",
        138 => "User-defined 1",
        139 => "Segmentation violation",
        140 => "User-defined 2",
        141 => "Write to pipe with no one reading",
        142 => "Signal raised by alarm",
        143 => "Termination (request to terminate)",
        _ => return None,
    };
    Some(info)
}

fn describe_failure(output: &ProcessOutput) -> String {
    let mut message = format!("exit code: {}", output.exit_code());
    if let Some(info) = exit_code_info(output.exit_code()) {
        message.push_str(&format!(" ({})", info));
    }
    message.push_str(&format!("\n    at {}", output.origin()));
    let stderr = output.stderr().trim_end();
    if !stderr.is_empty() {
        message.push('\n');
        message.push_str(stderr);
    }
    message
}

/// Everything the runner needs for one invocation.
#[derive(Debug, Clone)]
pub(crate) struct RunRequest {
    pub(crate) command: String,
    pub(crate) shell: Arc<ResolvedShell>,
    pub(crate) cwd: Option<PathBuf>,
    pub(crate) env: Vec<(String, String)>,
    pub(crate) verbose: bool,
    pub(crate) nothrow: bool,
    pub(crate) origin: Origin,
}

#[derive(Debug, Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

/// Buffers for one child. `combined` keeps chunks in arrival order.
#[derive(Debug, Default)]
struct Capture {
    stdout: Vec<u8>,
    stderr: Vec<u8>,
    combined: Vec<u8>,
}

impl Capture {
    async fn push(&mut self, stream: Stream, chunk: &[u8], mirror: bool) {
        log::trace!("{:?} chunk of {} bytes", stream, chunk.len());
        match stream {
            Stream::Stdout => self.stdout.extend_from_slice(chunk),
            Stream::Stderr => self.stderr.extend_from_slice(chunk),
        }
        self.combined.extend_from_slice(chunk);

        if mirror {
            let written = match stream {
                Stream::Stdout => write_through(tokio::io::stdout(), chunk).await,
                Stream::Stderr => write_through(tokio::io::stderr(), chunk).await,
            };
            if let Err(e) = written {
                log::debug!("Could not mirror {:?} chunk: {}", stream, e);
            }
        }
    }
}

async fn write_through(mut target: impl AsyncWrite + Unpin, chunk: &[u8]) -> io::Result<()> {
    target.write_all(chunk).await?;
    target.flush().await
}

/// Spawns the resolved shell with `request.command` and waits for it to exit.
///
/// Resolves with the captured result when the exit code is 0 (or when
/// `nothrow` is set); otherwise fails with [`ExecutionError::Failed`]
/// carrying the same result. There is no timeout: a hung child hangs the caller.
pub(crate) async fn execute(request: RunRequest) -> Result<ProcessOutput, ExecutionError> {
    if request.verbose {
        eprintln!("{}", color::highlight_command(&request.command));
    }

    let invocation = request.shell.invocation(&request.command);
    let mut command = Command::new(&invocation.program);
    command
        .args(&invocation.args)
        .envs(request.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .stdin(Stdio::inherit())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(dir) = &request.cwd {
        command.current_dir(dunce::simplified(dir));
    }
    #[cfg(windows)]
    command.creation_flags(crate::constants::CREATE_NO_WINDOW);

    log::debug!(
        "Spawning {} for '{}' (cwd: {:?}, origin: {})",
        invocation.program.display(),
        request.command,
        request.cwd,
        request.origin
    );

    let mut child = command.spawn().map_err(|e| ExecutionError::Spawn {
        command: request.command.clone(),
        source: e,
    })?;

    let stream_error = |source: io::Error| ExecutionError::Stream {
        command: request.command.clone(),
        source,
    };

    let mut stdout_pipe = child
        .stdout
        .take()
        .ok_or_else(|| stream_error(io::Error::other("stdout was not captured")))?;
    let mut stderr_pipe = child
        .stderr
        .take()
        .ok_or_else(|| stream_error(io::Error::other("stderr was not captured")))?;

    let capture = collect(&mut stdout_pipe, &mut stderr_pipe, request.verbose)
        .await
        .map_err(stream_error)?;
    let status = child.wait().await.map_err(stream_error)?;
    let exit_code = exit_code(status);

    log::debug!("'{}' exited with code {}", request.command, exit_code);

    let output = ProcessOutput::new(
        exit_code,
        String::from_utf8_lossy(&capture.stdout),
        String::from_utf8_lossy(&capture.stderr),
        String::from_utf8_lossy(&capture.combined),
        request.origin,
    );

    if output.success() || request.nothrow {
        Ok(output)
    } else {
        Err(ExecutionError::Failed(Box::new(output)))
    }
}

/// Reads both pipes until each reaches EOF, recording chunks as they arrive.
async fn collect(
    stdout_pipe: &mut (impl AsyncRead + Unpin),
    stderr_pipe: &mut (impl AsyncRead + Unpin),
    mirror: bool,
) -> io::Result<Capture> {
    let mut capture = Capture::default();
    let mut stdout_buf = vec![0u8; CHUNK_SIZE];
    let mut stderr_buf = vec![0u8; CHUNK_SIZE];
    let mut stdout_open = true;
    let mut stderr_open = true;

    while stdout_open || stderr_open {
        tokio::select! {
            read = stdout_pipe.read(&mut stdout_buf), if stdout_open => {
                let n = read?;
                if n == 0 {
                    stdout_open = false;
                } else {
                    let chunk = stdout_buf.get(..n).unwrap_or_default();
                    capture.push(Stream::Stdout, chunk, mirror).await;
                }
            }
            read = stderr_pipe.read(&mut stderr_buf), if stderr_open => {
                let n = read?;
                if n == 0 {
                    stderr_open = false;
                } else {
                    let chunk = stderr_buf.get(..n).unwrap_or_default();
                    capture.push(Stream::Stderr, chunk, mirror).await;
                }
            }
        }
    }
    Ok(capture)
}

fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    -1
}
