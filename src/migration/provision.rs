use std::sync::Arc;
use tracing::info;

use super::error::MigrationError;
use super::plan::MigrationPlan;
use crate::tfc::{TfcApi, WorkspaceRequest};

/// Creates the VCS-backed workspace for a plan row.
pub struct WorkspaceProvisioner {
    api: Arc<dyn TfcApi>,
    vcs_token_id: String,
}

impl WorkspaceProvisioner {
    pub fn new(api: Arc<dyn TfcApi>, vcs_token_id: impl Into<String>) -> Self {
        Self {
            api,
            vcs_token_id: vcs_token_id.into(),
        }
    }

    pub fn workspace_request(&self, plan: &MigrationPlan) -> WorkspaceRequest {
        WorkspaceRequest {
            name: plan.new_workspace.clone(),
            terraform_version: plan.terraform_version.clone(),
            working_directory: plan.working_dir.clone(),
            vcs_identifier: plan.vcs_repo.clone(),
            vcs_branch: plan.vcs_branch.clone(),
            oauth_token_id: self.vcs_token_id.clone(),
        }
    }

    pub async fn create_workspace(&self, plan: &MigrationPlan) -> Result<(), MigrationError> {
        let request = self.workspace_request(plan);
        self.api
            .create_workspace(&plan.new_org, &request)
            .await
            .map_err(|source| MigrationError::Provision {
                organization: plan.new_org.clone(),
                workspace: plan.new_workspace.clone(),
                source,
            })?;

        info!(
            "Created workspace {}/{} tracking {}@{}",
            plan.new_org, plan.new_workspace, plan.vcs_repo, plan.vcs_branch
        );
        Ok(())
    }
}
