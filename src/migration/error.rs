use std::path::PathBuf;

use super::report::CompletionReport;
use crate::error::{ErrorCode, OpsError};
use crate::subprocess::ProcessError;
use crate::tfc::TfcError;

/// Everything that can stop a row or a whole batch.
///
/// `MalformedRow` only ever skips its own row; every other variant ends the
/// batch when the orchestrator sees it.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },

    #[error("User aborted creation of new workspaces at row {row}")]
    UserAbort { row: usize },

    #[error("Failed to read the plan: {message}")]
    PlanRead {
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    #[error("Failed to read the operator's response: {0}")]
    Prompt(#[source] std::io::Error),

    #[error("Failed to read variables of legacy environment {organization}/{environment}: {source}")]
    SourceFetch {
        organization: String,
        environment: String,
        #[source]
        source: TfcError,
    },

    #[error("Failed to create workspace {organization}/{workspace}: {source}")]
    Provision {
        organization: String,
        workspace: String,
        #[source]
        source: TfcError,
    },

    #[error("Failed to create variable '{key}' in workspace {workspace}: {source}")]
    VariablePush {
        key: String,
        workspace: String,
        #[source]
        source: TfcError,
    },

    #[error("Failed to remove local state cache {}: {source}", .path.display())]
    StateCacheCleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("terraform init with legacy backend ({backend}) failed: {detail}")]
    LegacyInit {
        backend: String,
        detail: String,
        #[source]
        source: Option<ProcessError>,
    },

    #[error("terraform init with new backend ({backend}) failed: {detail}")]
    NewInit {
        backend: String,
        detail: String,
        #[source]
        source: Option<ProcessError>,
    },
}

impl MigrationError {
    pub fn is_abort(&self) -> bool {
        matches!(self, Self::UserAbort { .. })
    }

    fn code(&self) -> u16 {
        match self {
            Self::MalformedRow { .. } => ErrorCode::PLAN_MALFORMED_ROW,
            Self::UserAbort { .. } => ErrorCode::MIGRATION_USER_ABORT,
            Self::PlanRead { .. } => ErrorCode::PLAN_UNREADABLE,
            Self::Prompt(_) => ErrorCode::MIGRATION_PROMPT_FAILED,
            Self::SourceFetch { .. } => ErrorCode::API_SOURCE_FETCH,
            Self::Provision { .. } => ErrorCode::API_PROVISION,
            Self::VariablePush { .. } => ErrorCode::API_VARIABLE_PUSH,
            Self::StateCacheCleanup { .. } => ErrorCode::EXEC_STATE_CLEANUP,
            Self::LegacyInit { .. } => ErrorCode::EXEC_LEGACY_INIT,
            Self::NewInit { .. } => ErrorCode::EXEC_NEW_INIT,
        }
    }
}

impl From<MigrationError> for OpsError {
    fn from(err: MigrationError) -> Self {
        let code = err.code();
        let message = err.to_string();
        let converted = match &err {
            MigrationError::MalformedRow { row, .. } => {
                OpsError::plan_with_code(code, message, Some(*row))
            }
            MigrationError::PlanRead { .. } => OpsError::plan_with_code(code, message, None),
            MigrationError::SourceFetch { .. }
            | MigrationError::Provision { .. }
            | MigrationError::VariablePush { .. } => OpsError::api_with_code(code, message),
            MigrationError::StateCacheCleanup { .. } => {
                OpsError::execution_with_code(code, message, None)
            }
            MigrationError::LegacyInit { backend, .. } | MigrationError::NewInit { backend, .. } => {
                OpsError::execution_with_code(code, message, Some(format!("terraform init {backend}")))
            }
            MigrationError::UserAbort { .. } | MigrationError::Prompt(_) => {
                OpsError::migration_with_code(code, message)
            }
        };
        converted.with_source(err)
    }
}

/// A batch that stopped early, with whatever completed before the stop.
#[derive(Debug, thiserror::Error)]
#[error("migration stopped: {error}")]
pub struct BatchFailure {
    pub report: CompletionReport,
    #[source]
    pub error: MigrationError,
}

impl BatchFailure {
    pub fn new(report: CompletionReport, error: MigrationError) -> Self {
        Self { report, error }
    }

    pub fn is_abort(&self) -> bool {
        self.error.is_abort()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abort_maps_to_abort_exit_code() {
        let err: OpsError = MigrationError::UserAbort { row: 3 }.into();
        assert_eq!(err.code(), ErrorCode::MIGRATION_USER_ABORT);
        assert_eq!(err.exit_code(), 130);
    }

    #[test]
    fn test_init_failures_map_to_execution_errors() {
        let err: OpsError = MigrationError::NewInit {
            backend: "-backend-config=name=newOrg/newWS".to_string(),
            detail: "Error: state locked".to_string(),
            source: None,
        }
        .into();
        assert_eq!(err.code(), ErrorCode::EXEC_NEW_INIT);
        assert!(err.user_message().contains("state locked"));
    }

    #[test]
    fn test_variable_push_names_key() {
        let err = MigrationError::VariablePush {
            key: "region".to_string(),
            workspace: "network".to_string(),
            source: TfcError::InvalidToken,
        };
        assert!(err.to_string().contains("'region'"));
        let ops: OpsError = err.into();
        assert_eq!(ops.code(), ErrorCode::API_VARIABLE_PUSH);
    }
}
