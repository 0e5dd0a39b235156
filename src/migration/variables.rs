use std::sync::Arc;
use tracing::{debug, info};

use super::error::MigrationError;
use crate::tfc::{TfVar, TfcApi};

/// Copies variables from a legacy environment into a new workspace.
pub struct VariableTransfer {
    api: Arc<dyn TfcApi>,
}

impl VariableTransfer {
    pub fn new(api: Arc<dyn TfcApi>) -> Self {
        Self { api }
    }

    pub async fn fetch_legacy_variables(
        &self,
        organization: &str,
        environment: &str,
    ) -> Result<Vec<TfVar>, MigrationError> {
        let vars = self
            .api
            .list_legacy_variables(organization, environment)
            .await
            .map_err(|source| MigrationError::SourceFetch {
                organization: organization.to_string(),
                environment: environment.to_string(),
                source,
            })?;

        debug!(
            "Fetched {} variables from {}/{}",
            vars.len(),
            organization,
            environment
        );
        Ok(vars)
    }

    /// Escape and submit one variable.
    pub async fn push_variable(
        &self,
        organization: &str,
        workspace: &str,
        var: TfVar,
    ) -> Result<(), MigrationError> {
        let var = var.escape_hcl();
        self.api
            .create_variable(organization, workspace, &var)
            .await
            .map_err(|source| MigrationError::VariablePush {
                key: var.key().to_string(),
                workspace: workspace.to_string(),
                source,
            })
    }

    /// Push every variable in order, stopping at the first failure.
    ///
    /// Returns the keys whose fetched value was the sensitive sentinel.
    pub async fn transfer(
        &self,
        organization: &str,
        workspace: &str,
        vars: Vec<TfVar>,
    ) -> Result<Vec<String>, MigrationError> {
        let sensitive = sensitive_keys(&vars);
        let total = vars.len();

        for var in vars {
            debug!("Creating variable {} in {}/{}", var.key, organization, workspace);
            self.push_variable(organization, workspace, var).await?;
        }

        info!(
            "Copied {} variables to {}/{} ({} sensitive)",
            total,
            organization,
            workspace,
            sensitive.len()
        );
        Ok(sensitive)
    }
}

/// Keys of variables whose source value is the sensitive sentinel, in order.
pub fn sensitive_keys(vars: &[TfVar]) -> Vec<String> {
    vars.iter()
        .filter(|v| v.is_sensitive())
        .map(|v| v.key.clone())
        .collect()
}
