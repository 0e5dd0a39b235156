use std::path::PathBuf;
use thiserror::Error;

pub mod codes;

pub use codes::{describe_error_code, ErrorCode};

/// The unified error type for the tfc-ops application
#[derive(Error, Debug)]
pub enum OpsError {
    #[error("[E{code:04}] Configuration error: {message}")]
    Config {
        code: u16,
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Plan error: {message}")]
    Plan {
        code: u16,
        message: String,
        row: Option<usize>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] API error: {message}")]
    Api {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Execution error: {message}")]
    Execution {
        code: u16,
        message: String,
        command: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Migration error: {message}")]
    Migration {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl OpsError {
    /// Create a configuration error with specific code and file path
    pub fn config_with_code(code: u16, message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Config {
            code,
            message: message.into(),
            path,
            source: None,
        }
    }

    /// Create a plan error with specific code and row number
    pub fn plan_with_code(code: u16, message: impl Into<String>, row: Option<usize>) -> Self {
        Self::Plan {
            code,
            message: message.into(),
            row,
            source: None,
        }
    }

    pub fn api_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Api {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create an execution error with specific code
    pub fn execution_with_code(
        code: u16,
        message: impl Into<String>,
        command: Option<String>,
    ) -> Self {
        Self::Execution {
            code,
            message: message.into(),
            command,
            source: None,
        }
    }

    pub fn migration_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Migration {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error to this error
    pub fn with_source(
        mut self,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        match &mut self {
            Self::Config { source: src, .. }
            | Self::Plan { source: src, .. }
            | Self::Api { source: src, .. }
            | Self::Execution { source: src, .. }
            | Self::Migration { source: src, .. } => {
                *src = Some(source.into());
            }
        }
        self
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } => 2,
            Self::Plan { .. } => 3,
            Self::Api { .. } => 4,
            Self::Execution { .. } => 5,
            Self::Migration { code, .. } if *code == ErrorCode::MIGRATION_USER_ABORT => 130,
            Self::Migration { .. } => 6,
        }
    }

    /// Get the error code
    pub fn code(&self) -> u16 {
        match self {
            Self::Config { code, .. }
            | Self::Plan { code, .. }
            | Self::Api { code, .. }
            | Self::Execution { code, .. }
            | Self::Migration { code, .. } => *code,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message, path, .. } => match path {
                Some(p) => format!("Configuration problem in {}: {}", p.display(), message),
                None => format!("Configuration problem: {}", message),
            },
            Self::Plan { message, row, .. } => match row {
                Some(r) => format!("Plan row {} error: {}", r, message),
                None => format!("Plan error: {}", message),
            },
            Self::Api { message, .. } => format!("Terraform API error: {}", message),
            Self::Execution {
                message, command, ..
            } => match command {
                Some(cmd) => format!("Command '{}' failed: {}", cmd, message),
                None => format!("Execution error: {}", message),
            },
            Self::Migration { message, .. } => message.clone(),
        }
    }

    /// Get a developer-friendly error message with full chain
    pub fn developer_message(&self) -> String {
        format!("{:#}", self)
    }
}

/// Type alias for Results using OpsError
pub type Result<T> = std::result::Result<T, OpsError>;
