pub mod builder;
pub mod error;
pub mod mock;
pub mod runner;
pub mod terraform;

#[cfg(test)]
mod tests;

pub use builder::InitCommandBuilder;
pub use error::ProcessError;
pub use mock::MockProcessRunner;
pub use runner::{ExitStatus, ProcessCommand, ProcessOutput, ProcessRunner, TokioProcessRunner};
pub use terraform::{backend_config_arg, TerraformRunner, TerraformRunnerImpl};

use std::sync::Arc;

#[derive(Clone)]
pub struct SubprocessManager {
    runner: Arc<dyn ProcessRunner>,
}

impl SubprocessManager {
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self { runner }
    }

    pub fn production() -> Self {
        Self::new(Arc::new(runner::TokioProcessRunner))
    }

    pub fn terraform(&self, program: &str) -> TerraformRunnerImpl {
        TerraformRunnerImpl::new(Arc::clone(&self.runner), program)
    }
}
