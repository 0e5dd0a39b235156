use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

use super::builder::InitCommandBuilder;
use super::error::ProcessError;
use super::runner::{ProcessOutput, ProcessRunner};

/// Argument pointing `terraform init` at a remote state name (`org/name`).
pub fn backend_config_arg(organization: &str, name: &str) -> String {
    format!("-backend-config=name={}/{}", organization, name)
}

#[async_trait]
pub trait TerraformRunner: Send + Sync {
    /// Run `terraform init` in `dir` with the given backend config argument.
    ///
    /// When `answer` is set it is written to the process's stdin, for
    /// answering the state migration prompt. Without it stdin is closed
    /// so the tool cannot wait on a human.
    async fn init(
        &self,
        dir: &Path,
        backend_config: &str,
        answer: Option<&str>,
    ) -> Result<ProcessOutput, ProcessError>;
}

pub struct TerraformRunnerImpl {
    runner: Arc<dyn ProcessRunner>,
    program: String,
}

impl TerraformRunnerImpl {
    pub fn new(runner: Arc<dyn ProcessRunner>, program: impl Into<String>) -> Self {
        Self {
            runner,
            program: program.into(),
        }
    }
}

#[async_trait]
impl TerraformRunner for TerraformRunnerImpl {
    async fn init(
        &self,
        dir: &Path,
        backend_config: &str,
        answer: Option<&str>,
    ) -> Result<ProcessOutput, ProcessError> {
        let command = InitCommandBuilder::new(&self.program, backend_config)
            .in_dir(dir)
            .answer(answer)
            .build();

        self.runner.run(command).await
    }
}
