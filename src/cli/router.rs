//! Command routing and execution

use anyhow::Result;

use crate::cli::args::{Cli, Commands, PlanCommands, VariablesCommands};
use crate::cli::commands::*;
use crate::config::{require_token, OpsConfig};

/// Execute a CLI command based on the parsed arguments.
///
/// `config` is the layered configuration resolved at startup; commands that
/// talk to the API fail on its error or on a missing token, `plan validate`
/// ignores it.
pub async fn execute_command(cli: Cli, config: crate::error::Result<OpsConfig>) -> Result<()> {
    match cli.command {
        Commands::Migrate {
            plan,
            vcs_token_id,
            auto_accept,
            json,
            ..
        } => {
            let config = require_token(config?)?;
            run_migrate(
                &config,
                MigrateParams {
                    plan,
                    vcs_token_id,
                    auto_accept,
                    json,
                },
            )
            .await
        }
        Commands::Plan {
            command: PlanCommands::Validate { plan },
        } => run_plan_validate(&plan),
        Commands::Variables {
            command:
                VariablesCommands::List {
                    organization,
                    environment,
                },
        } => {
            let config = require_token(config?)?;
            run_variables_list(&config, &organization, &environment).await
        }
    }
}
