//! Batch driver
//!
//! Walks the plan one row at a time. A malformed row is reported and
//! skipped; the operator may skip or abort at each valid row; any other
//! failure ends the batch and hands back whatever completed before it.

use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, info_span, warn, Instrument};

use super::error::{BatchFailure, MigrationError};
use super::plan::{MigrationPlan, PlanReader};
use super::provision::WorkspaceProvisioner;
use super::reinit::StateReinitializer;
use super::report::CompletionReport;
use super::variables::VariableTransfer;
use crate::config::OpsConfig;
use crate::interaction::{
    ConfirmationStrategy, ConsoleDisplay, Decision, MigrationDisplay, TerminalConfirmation,
};
use crate::subprocess::TerraformRunner;
use crate::tfc::TfcApi;

pub const ABORT_NOTICE: &str = " NOTICE: User Aborted Creation of New Workspaces";

pub struct MigrationOrchestrator {
    provisioner: WorkspaceProvisioner,
    variables: VariableTransfer,
    reinitializer: StateReinitializer,
    confirmation: Box<dyn ConfirmationStrategy>,
    display: Arc<dyn MigrationDisplay>,
}

impl MigrationOrchestrator {
    /// Orchestrator that asks on the terminal and prints to the console.
    pub fn new(
        config: &OpsConfig,
        api: Arc<dyn TfcApi>,
        terraform: Arc<dyn TerraformRunner>,
        vcs_token_id: impl Into<String>,
    ) -> Self {
        Self {
            provisioner: WorkspaceProvisioner::new(Arc::clone(&api), vcs_token_id),
            variables: VariableTransfer::new(api),
            reinitializer: StateReinitializer::new(
                terraform,
                config.working_dir.clone(),
                config.read_only,
            ),
            confirmation: Box::new(TerminalConfirmation::new()),
            display: Arc::new(ConsoleDisplay::new()),
        }
    }

    pub fn with_confirmation(mut self, confirmation: Box<dyn ConfirmationStrategy>) -> Self {
        self.confirmation = confirmation;
        self
    }

    pub fn with_display(mut self, display: Arc<dyn MigrationDisplay>) -> Self {
        self.display = display;
        self
    }

    pub async fn run_file(&self, path: &Path) -> Result<CompletionReport, BatchFailure> {
        let reader = PlanReader::open(path)
            .map_err(|e| BatchFailure::new(CompletionReport::new(), e))?;
        self.run(reader).await
    }

    pub async fn run<R: Read>(
        &self,
        reader: PlanReader<R>,
    ) -> Result<CompletionReport, BatchFailure> {
        let mut report = CompletionReport::new();

        for entry in reader {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => return Err(BatchFailure::new(report, error)),
            };
            let row = entry.row;

            let plan = match entry.plan {
                Ok(plan) => plan,
                Err(error) => {
                    warn!("Skipping malformed row {}: {}", row, error);
                    let reason = match &error {
                        MigrationError::MalformedRow { reason, .. } => reason.clone(),
                        other => other.to_string(),
                    };
                    self.display.warning(&format!(
                        "Skipping row {} because of an error ... {}",
                        row, reason
                    ));
                    report.record_malformed(row);
                    continue;
                }
            };

            let decision = match self.confirmation.decide(row, &plan).await {
                Ok(decision) => decision,
                Err(e) => return Err(BatchFailure::new(report, MigrationError::Prompt(e))),
            };

            match decision {
                Decision::Abort => {
                    info!("Operator aborted at row {}", row);
                    self.display.warning(ABORT_NOTICE);
                    return Err(BatchFailure::new(report, MigrationError::UserAbort { row }));
                }
                Decision::Skip => {
                    self.display.info(&format!(
                        "Skipping row {} ({}/{})",
                        row, plan.new_org, plan.new_workspace
                    ));
                    report.record_skipped(row);
                    continue;
                }
                Decision::Proceed => {}
            }

            self.display.info(&format!(
                "Migrating {}/{} to {}/{}",
                plan.legacy_org, plan.legacy_env, plan.new_org, plan.new_workspace
            ));

            let span = info_span!("row", row, workspace = %plan.new_workspace);
            match self.migrate_row(&plan).instrument(span).await {
                Ok(sensitive) => {
                    self.display.success(&format!(
                        "Workspace {}/{} migrated",
                        plan.new_org, plan.new_workspace
                    ));
                    report.record_completed(&plan.new_workspace, sensitive);
                }
                Err(error) => {
                    self.display.error(&format!(
                        "Row {} ({}/{}) failed, stopping: {}",
                        row, plan.new_org, plan.new_workspace, error
                    ));
                    return Err(BatchFailure::new(report, error));
                }
            }
        }

        info!("Migration finished: {} workspaces completed", report.len());
        Ok(report)
    }

    /// Provision, copy variables and reinitialize one row.
    ///
    /// Legacy variables are read first so an unreadable source environment
    /// stops the row before anything is created.
    async fn migrate_row(&self, plan: &MigrationPlan) -> Result<Vec<String>, MigrationError> {
        let vars = self
            .variables
            .fetch_legacy_variables(&plan.legacy_org, &plan.legacy_env)
            .await?;

        self.provisioner.create_workspace(plan).await?;

        let sensitive = self
            .variables
            .transfer(&plan.new_org, &plan.new_workspace, vars)
            .await?;

        self.reinitializer.reinitialize(plan).await?;
        Ok(sensitive)
    }
}
