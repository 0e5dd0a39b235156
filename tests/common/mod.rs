//! Common test utilities and helpers
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use tfc_ops::config::OpsConfig;
use tfc_ops::interaction::{Decision, RecordingDisplay, ScriptedConfirmation};
use tfc_ops::migration::MigrationOrchestrator;
use tfc_ops::subprocess::{MockProcessRunner, ProcessRunner, TerraformRunnerImpl};
use tfc_ops::tfc::MockTfcApi;

pub const PLAN_HEADER: &str =
    "legacy_org,legacy_env,new_org,new_workspace,terraform_version,vcs_repo,vcs_branch,working_dir";

/// Write a plan file with the standard header followed by `rows`.
pub fn write_plan(dir: &Path, rows: &[&str]) -> PathBuf {
    let mut content = String::from(PLAN_HEADER);
    content.push('\n');
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    let path = dir.join("plan.csv");
    std::fs::write(&path, content).unwrap();
    path
}

/// A plan row for `legacyOrg/<env>` migrating to `newOrg/<workspace>`.
pub fn plan_row(env: &str, workspace: &str) -> String {
    format!("legacyOrg,{env},newOrg,{workspace},1.5.0,org/repo,main,./infra")
}

/// Everything an orchestrator run touches, backed by mocks
pub struct MigrationFixture {
    pub temp_dir: TempDir,
    pub api: MockTfcApi,
    pub process: MockProcessRunner,
    pub display: RecordingDisplay,
    pub confirmation: Arc<ScriptedConfirmation>,
    pub read_only: bool,
}

impl MigrationFixture {
    /// Fixture whose terraform calls all succeed
    pub fn new(api: MockTfcApi, decisions: Vec<Decision>) -> Self {
        Self::with_process(api, MockProcessRunner::new(), decisions)
    }

    pub fn with_process(
        api: MockTfcApi,
        process: MockProcessRunner,
        decisions: Vec<Decision>,
    ) -> Self {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir_all(temp_dir.path().join("work")).unwrap();
        Self {
            temp_dir,
            api,
            process,
            display: RecordingDisplay::new(),
            confirmation: Arc::new(ScriptedConfirmation::new(decisions)),
            read_only: false,
        }
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn work_dir(&self) -> PathBuf {
        self.temp_dir.path().join("work")
    }

    pub fn write_plan(&self, rows: &[&str]) -> PathBuf {
        write_plan(self.temp_dir.path(), rows)
    }

    pub fn config(&self) -> OpsConfig {
        OpsConfig::new("test-token")
            .with_working_dir(self.work_dir())
            .with_read_only(self.read_only)
    }

    pub fn orchestrator(&self) -> MigrationOrchestrator {
        let runner = Arc::new(self.process.clone()) as Arc<dyn ProcessRunner>;
        MigrationOrchestrator::new(
            &self.config(),
            Arc::new(self.api.clone()),
            Arc::new(TerraformRunnerImpl::new(runner, "terraform")),
            "ot-test",
        )
        .with_confirmation(Box::new(Arc::clone(&self.confirmation)))
        .with_display(Arc::new(self.display.clone()))
    }

    /// Backend arguments of every terraform call, in order
    pub fn terraform_backends(&self) -> Vec<String> {
        self.process.backends()
    }
}
