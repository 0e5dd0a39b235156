use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use super::error::ProcessError;

#[derive(Debug, Clone)]
pub struct ProcessCommand {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
    /// Written to the child's stdin, which is then closed
    pub stdin: Option<String>,
}

impl ProcessCommand {
    /// Program and arguments joined for logs and error messages
    pub fn display(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProcessOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
    pub duration: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Error(i32),
    Signal(i32),
}

impl From<std::process::ExitStatus> for ExitStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        if status.success() {
            return ExitStatus::Success;
        }
        if let Some(code) = status.code() {
            return ExitStatus::Error(code);
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return ExitStatus::Signal(signal);
            }
        }
        ExitStatus::Error(1)
    }
}

impl ExitStatus {
    pub fn success(&self) -> bool {
        matches!(self, ExitStatus::Success)
    }

    pub fn code(&self) -> Option<i32> {
        match self {
            ExitStatus::Success => Some(0),
            ExitStatus::Error(code) => Some(*code),
            ExitStatus::Signal(_) => None,
        }
    }
}

#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(&self, command: ProcessCommand) -> Result<ProcessOutput, ProcessError>;
}

/// Runs commands as real child processes.
///
/// The child handle lives only inside [`ProcessRunner::run`] and is spawned
/// with `kill_on_drop`, so its pipes are closed and the process reaped on
/// every exit path, including early error returns.
pub struct TokioProcessRunner;

impl TokioProcessRunner {
    fn configure_command(command: &ProcessCommand) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(&command.program);
        // Inherits the parent environment; terraform reads its credentials from it
        cmd.args(&command.args);

        if let Some(dir) = &command.working_dir {
            cmd.current_dir(dir);
        }

        if command.stdin.is_some() {
            cmd.stdin(Stdio::piped());
        } else {
            cmd.stdin(Stdio::null());
        }
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd.kill_on_drop(true);
        cmd
    }

    fn map_spawn_error(error: std::io::Error, command: &ProcessCommand) -> ProcessError {
        if error.kind() == std::io::ErrorKind::NotFound {
            ProcessError::CommandNotFound(command.program.clone())
        } else {
            ProcessError::SpawnFailed {
                command: command.display(),
                source: error,
            }
        }
    }

    /// Write the scripted answer and close the pipe.
    ///
    /// A child that exits without reading its input closes the pipe first;
    /// the resulting broken pipe is not an error.
    async fn write_stdin(
        pipe: Option<tokio::process::ChildStdin>,
        data: Option<&str>,
        command: &str,
    ) -> Result<(), ProcessError> {
        use tokio::io::AsyncWriteExt;

        let (Some(mut pipe), Some(data)) = (pipe, data) else {
            return Ok(());
        };

        let result = async {
            pipe.write_all(data.as_bytes()).await?;
            pipe.shutdown().await
        }
        .await;

        match result {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                tracing::debug!("'{}' closed stdin before reading the answer", command);
                Ok(())
            }
            Err(e) => Err(ProcessError::Stdin {
                command: command.to_string(),
                source: e,
            }),
        }
    }

    fn log_result(result: &ProcessOutput, command: &ProcessCommand) {
        if let ExitStatus::Signal(signal) = result.status {
            tracing::warn!(
                "'{}' killed by signal {} after {:?}",
                command.display(),
                signal,
                result.duration
            );
            return;
        }

        tracing::debug!(
            status = ?result.status,
            elapsed = ?result.duration,
            "'{}' finished",
            command.display()
        );
        if !result.status.success() && !result.stderr.is_empty() {
            tracing::trace!("'{}' stderr: {}", command.display(), result.stderr);
        }
    }
}

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(&self, command: ProcessCommand) -> Result<ProcessOutput, ProcessError> {
        let start = std::time::Instant::now();
        tracing::debug!(
            dir = ?command.working_dir,
            answered = command.stdin.is_some(),
            "Running {}",
            command.display()
        );

        let mut child = Self::configure_command(&command)
            .spawn()
            .map_err(|e| Self::map_spawn_error(e, &command))?;

        let display = command.display();
        let stdin_pipe = child.stdin.take();
        let (written, output) = tokio::join!(
            Self::write_stdin(stdin_pipe, command.stdin.as_deref(), &display),
            child.wait_with_output()
        );
        written?;
        let output = output?;

        let result = ProcessOutput {
            status: output.status.into(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            duration: start.elapsed(),
        };

        Self::log_result(&result, &command);
        Ok(result)
    }
}
