use crate::error::{ErrorCode, OpsError};

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    #[error("Failed to spawn '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write stdin for '{command}': {source}")]
    Stdin {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convert ProcessError to OpsError
impl From<ProcessError> for OpsError {
    fn from(err: ProcessError) -> Self {
        let (code, command) = match &err {
            ProcessError::CommandNotFound(cmd) => {
                (ErrorCode::EXEC_COMMAND_NOT_FOUND, Some(cmd.clone()))
            }
            ProcessError::SpawnFailed { command, .. } => {
                (ErrorCode::EXEC_SPAWN_FAILED, Some(command.clone()))
            }
            ProcessError::Stdin { command, .. } => {
                (ErrorCode::EXEC_STDIN_ERROR, Some(command.clone()))
            }
            ProcessError::Io(_) => (ErrorCode::EXEC_GENERIC, None),
        };

        OpsError::execution_with_code(code, err.to_string(), command).with_source(err)
    }
}
