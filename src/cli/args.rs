//! CLI argument structures

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ConfigOverrides;

/// Migrate legacy Terraform environments to workspaces
#[derive(Parser)]
#[command(name = "tfc-ops")]
#[command(about = "tfc-ops - Batch-migrate legacy Terraform environments to workspaces", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to a TOML config file (defaults to ~/.tfc-ops.toml)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Read-only mode: fetch data but create nothing and run no terraform
    #[arg(short = 'r', long = "read-only-mode", global = true)]
    pub read_only: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Migrate every environment listed in a plan file
    #[command(name = "migrate")]
    Migrate {
        /// CSV plan file; the first row is a header
        #[arg(short = 'p', long, value_name = "FILE")]
        plan: PathBuf,

        /// OAuth token ID of the VCS connection new workspaces use
        #[arg(long, value_name = "ID")]
        vcs_token_id: String,

        /// Proceed with every row without asking
        #[arg(short = 'y', long = "yes")]
        auto_accept: bool,

        /// Print the completion report as JSON
        #[arg(long)]
        json: bool,

        /// Terraform configuration directory to re-point (defaults to current directory)
        #[arg(long, value_name = "DIR")]
        working_dir: Option<PathBuf>,

        /// Terraform executable to run
        #[arg(long, value_name = "PATH")]
        terraform_bin: Option<String>,
    },

    /// Inspect plan files
    #[command(name = "plan")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },

    /// Inspect legacy environment variables
    #[command(name = "variables")]
    Variables {
        #[command(subcommand)]
        command: VariablesCommands,
    },
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Check every row of a plan without contacting the API
    Validate {
        /// CSV plan file; the first row is a header
        #[arg(short = 'p', long, value_name = "FILE")]
        plan: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum VariablesCommands {
    /// List the variables of a legacy environment
    List {
        /// Legacy organization
        #[arg(short = 'o', long)]
        organization: String,

        /// Legacy environment
        #[arg(short = 'e', long)]
        environment: String,
    },
}

impl Cli {
    /// Configuration values given on the command line
    pub fn config_overrides(&self) -> ConfigOverrides {
        let mut overrides = ConfigOverrides {
            config_path: self.config.clone(),
            read_only: self.read_only,
            ..ConfigOverrides::default()
        };
        if let Commands::Migrate {
            working_dir,
            terraform_bin,
            ..
        } = &self.command
        {
            overrides.working_dir = working_dir.clone();
            overrides.terraform_bin = terraform_bin.clone();
        }
        overrides
    }
}
