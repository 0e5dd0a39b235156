use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::error::ProcessError;
use super::runner::{ExitStatus, ProcessCommand, ProcessOutput, ProcessRunner};

#[derive(Default)]
struct MockState {
    /// backend argument -> stderr of the failed init
    failing_backends: HashMap<String, String>,
    missing_program: bool,
    calls: Vec<ProcessCommand>,
}

/// In-memory [`ProcessRunner`] that records every command.
///
/// Every run succeeds unless its backend argument was scripted to fail.
#[derive(Clone, Default)]
pub struct MockProcessRunner {
    state: Arc<Mutex<MockState>>,
}

impl MockProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// `init` against this backend exits 1 with `stderr`
    pub fn fail_backend(self, backend_config: &str, stderr: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .failing_backends
            .insert(backend_config.to_string(), stderr.to_string());
        self
    }

    /// Behave as if the program is missing from PATH
    pub fn missing_program(self) -> Self {
        self.state.lock().unwrap().missing_program = true;
        self
    }

    pub fn calls(&self) -> Vec<ProcessCommand> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Backend argument of every run, in order
    pub fn backends(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .map(|cmd| cmd.args.get(1).cloned().unwrap_or_default())
            .collect()
    }
}

#[async_trait]
impl ProcessRunner for MockProcessRunner {
    async fn run(&self, command: ProcessCommand) -> Result<ProcessOutput, ProcessError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(command.clone());

        if state.missing_program {
            return Err(ProcessError::CommandNotFound(command.program));
        }

        let failure = command
            .args
            .get(1)
            .and_then(|backend| state.failing_backends.get(backend));
        let (status, stderr) = match failure {
            Some(stderr) => (ExitStatus::Error(1), stderr.clone()),
            None => (ExitStatus::Success, String::new()),
        };

        Ok(ProcessOutput {
            status,
            stdout: String::new(),
            stderr,
            duration: Duration::from_millis(10),
        })
    }
}
