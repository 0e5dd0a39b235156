//! `tfc-ops migrate`

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use crate::config::OpsConfig;
use crate::error::OpsError;
use crate::interaction::AlwaysProceed;
use crate::migration::{CompletionReport, MigrationOrchestrator};
use crate::subprocess::SubprocessManager;
use crate::tfc::HttpTfcClient;

pub struct MigrateParams {
    pub plan: PathBuf,
    pub vcs_token_id: String,
    pub auto_accept: bool,
    pub json: bool,
}

/// Run the batch, print whatever completed, then surface the batch error.
pub async fn run_migrate(config: &OpsConfig, params: MigrateParams) -> Result<()> {
    let api = HttpTfcClient::new(config).map_err(OpsError::from)?;
    let terraform = SubprocessManager::production().terraform(&config.terraform_bin);

    let mut orchestrator =
        MigrationOrchestrator::new(config, Arc::new(api), Arc::new(terraform), params.vcs_token_id);
    if params.auto_accept {
        orchestrator = orchestrator.with_confirmation(Box::new(AlwaysProceed));
    }

    debug!("Running plan {}", params.plan.display());
    let (report, failure) = match orchestrator.run_file(&params.plan).await {
        Ok(report) => (report, None),
        Err(failure) => (failure.report, Some(failure.error)),
    };

    print_report(&report, params.json)?;

    match failure {
        None => Ok(()),
        Some(error) => Err(OpsError::from(error).into()),
    }
}

fn print_report(report: &CompletionReport, json: bool) -> Result<()> {
    if json {
        println!(
            "{}",
            report
                .to_json()
                .context("Failed to serialize completion report")?
        );
    } else {
        print!("{}", report.render_text());
    }
    Ok(())
}
