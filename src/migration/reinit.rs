use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use super::error::MigrationError;
use super::plan::MigrationPlan;
use crate::subprocess::{backend_config_arg, ProcessError, TerraformRunner};

/// Local terraform cache removed before every reinitialization
pub const STATE_CACHE_DIR: &str = ".terraform";

/// Reply to terraform's "copy existing state to the new backend?" question
pub const STATE_MIGRATION_ANSWER: &str = "yes\n";

/// Points the local terraform working directory at the new backend.
pub struct StateReinitializer {
    terraform: Arc<dyn TerraformRunner>,
    working_dir: PathBuf,
    read_only: bool,
}

impl StateReinitializer {
    pub fn new(terraform: Arc<dyn TerraformRunner>, working_dir: PathBuf, read_only: bool) -> Self {
        Self {
            terraform,
            working_dir,
            read_only,
        }
    }

    pub async fn reinitialize(&self, plan: &MigrationPlan) -> Result<(), MigrationError> {
        let legacy_backend = backend_config_arg(&plan.legacy_org, &plan.legacy_env);
        let new_backend = backend_config_arg(&plan.new_org, &plan.new_workspace);

        if self.read_only {
            info!(
                "Read-only mode: would run terraform init {} then terraform init {} in {}",
                legacy_backend,
                new_backend,
                self.working_dir.display()
            );
            return Ok(());
        }

        self.remove_state_cache()?;

        debug!("terraform init {}", legacy_backend);
        self.run_init(&legacy_backend, None)
            .await
            .map_err(|(detail, source)| MigrationError::LegacyInit {
                backend: legacy_backend.clone(),
                detail,
                source,
            })?;

        debug!("terraform init {} (answering state migration prompt)", new_backend);
        self.run_init(&new_backend, Some(STATE_MIGRATION_ANSWER))
            .await
            .map_err(|(detail, source)| MigrationError::NewInit {
                backend: new_backend.clone(),
                detail,
                source,
            })?;

        info!(
            "Local state moved from {}/{} to {}/{}",
            plan.legacy_org, plan.legacy_env, plan.new_org, plan.new_workspace
        );
        Ok(())
    }

    fn remove_state_cache(&self) -> Result<(), MigrationError> {
        let path = self.working_dir.join(STATE_CACHE_DIR);
        match std::fs::remove_dir_all(&path) {
            Ok(()) => {
                debug!("Removed {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(MigrationError::StateCacheCleanup { path, source }),
        }
    }

    /// Run one init, reducing any failure to its stderr and process error.
    async fn run_init(
        &self,
        backend: &str,
        answer: Option<&str>,
    ) -> Result<(), (String, Option<ProcessError>)> {
        let output = self
            .terraform
            .init(&self.working_dir, backend, answer)
            .await
            .map_err(|e| (e.to_string(), Some(e)))?;

        if !output.status.success() {
            let detail = match output.stderr.trim() {
                "" => format!("exited with {:?}", output.status),
                stderr => stderr.to_string(),
            };
            return Err((detail, None));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subprocess::{MockProcessRunner, ProcessRunner, TerraformRunnerImpl};
    use std::path::Path;
    use tempfile::TempDir;

    fn plan() -> MigrationPlan {
        MigrationPlan {
            legacy_org: "legacyOrg".to_string(),
            legacy_env: "legacyEnv".to_string(),
            new_org: "newOrg".to_string(),
            new_workspace: "newWS".to_string(),
            terraform_version: "1.5.0".to_string(),
            vcs_repo: "org/repo".to_string(),
            vcs_branch: "main".to_string(),
            working_dir: "./infra".to_string(),
        }
    }

    fn reinitializer(mock: &MockProcessRunner, dir: &Path, read_only: bool) -> StateReinitializer {
        let runner = Arc::new(mock.clone()) as Arc<dyn ProcessRunner>;
        StateReinitializer::new(
            Arc::new(TerraformRunnerImpl::new(runner, "terraform")),
            dir.to_path_buf(),
            read_only,
        )
    }

    #[tokio::test]
    async fn test_two_inits_in_order_with_answer_on_second() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join(".terraform/providers")).unwrap();

        let mock = MockProcessRunner::new();

        reinitializer(&mock, temp.path(), false)
            .reinitialize(&plan())
            .await
            .unwrap();

        assert!(!temp.path().join(".terraform").exists());

        let calls = mock.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(
            calls[0].args,
            vec!["init", "-backend-config=name=legacyOrg/legacyEnv"]
        );
        assert_eq!(calls[0].stdin, None);
        assert_eq!(calls[0].working_dir.as_deref(), Some(temp.path()));
        assert_eq!(
            calls[1].args,
            vec!["init", "-backend-config=name=newOrg/newWS"]
        );
        assert_eq!(calls[1].stdin.as_deref(), Some("yes\n"));
    }

    #[tokio::test]
    async fn test_missing_cache_is_fine() {
        let temp = TempDir::new().unwrap();
        let mock = MockProcessRunner::new();

        assert!(reinitializer(&mock, temp.path(), false)
            .reinitialize(&plan())
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_legacy_init_failure_carries_stderr() {
        let temp = TempDir::new().unwrap();
        let mock = MockProcessRunner::new().fail_backend(
            "-backend-config=name=legacyOrg/legacyEnv",
            "Error: backend not found\n",
        );

        let err = reinitializer(&mock, temp.path(), false)
            .reinitialize(&plan())
            .await
            .unwrap_err();

        match err {
            MigrationError::LegacyInit { backend, detail, .. } => {
                assert_eq!(backend, "-backend-config=name=legacyOrg/legacyEnv");
                assert_eq!(detail, "Error: backend not found");
            }
            other => panic!("Expected LegacyInit, got {other:?}"),
        }
        assert_eq!(mock.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_new_init_failure() {
        let temp = TempDir::new().unwrap();
        let mock = MockProcessRunner::new()
            .fail_backend("-backend-config=name=newOrg/newWS", "Error: state lock");

        let err = reinitializer(&mock, temp.path(), false)
            .reinitialize(&plan())
            .await
            .unwrap_err();
        assert!(matches!(err, MigrationError::NewInit { ref detail, .. } if detail == "Error: state lock"));
    }

    #[tokio::test]
    async fn test_missing_binary_is_legacy_init_failure() {
        let temp = TempDir::new().unwrap();
        let mock = MockProcessRunner::new().missing_program();

        let err = reinitializer(&mock, temp.path(), false)
            .reinitialize(&plan())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            MigrationError::LegacyInit {
                source: Some(ProcessError::CommandNotFound(_)),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_read_only_touches_nothing() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join(".terraform")).unwrap();
        let mock = MockProcessRunner::new();

        reinitializer(&mock, temp.path(), true)
            .reinitialize(&plan())
            .await
            .unwrap();

        assert!(temp.path().join(".terraform").exists());
        assert!(mock.calls().is_empty());
    }
}
