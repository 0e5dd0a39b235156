use std::path::{Path, PathBuf};

use super::runner::ProcessCommand;

/// Builds one `terraform init` run against a single backend.
pub struct InitCommandBuilder {
    program: String,
    backend_config: String,
    working_dir: Option<PathBuf>,
    answer: Option<String>,
}

impl InitCommandBuilder {
    pub fn new(program: &str, backend_config: &str) -> Self {
        Self {
            program: program.to_string(),
            backend_config: backend_config.to_string(),
            working_dir: None,
            answer: None,
        }
    }

    pub fn in_dir(mut self, dir: &Path) -> Self {
        self.working_dir = Some(dir.to_path_buf());
        self
    }

    /// Reply written to stdin for the state migration prompt.
    /// Without one, stdin is closed.
    pub fn answer(mut self, answer: Option<&str>) -> Self {
        self.answer = answer.map(str::to_string);
        self
    }

    pub fn build(self) -> ProcessCommand {
        ProcessCommand {
            program: self.program,
            args: vec!["init".to_string(), self.backend_config],
            working_dir: self.working_dir,
            stdin: self.answer,
        }
    }
}
