//! # tfc-ops
//!
//! Batch-migrates legacy Terraform environments to VCS-backed workspaces.
//!
//! ## Usage
//!
//! ```bash
//! ATLAS_TOKEN=... tfc-ops migrate --plan plan.csv --vcs-token-id ot-xxxx
//! ```
//!
//! ## Modules
//!
//! - `app` - Process setup: verbosity, logging, fatal error reporting
//! - `cli` - Argument parsing and command handlers
//! - `config` - Layered runtime configuration
//! - `error` - Crate-wide error type and error code registry
//! - `interaction` - Per-row operator confirmation and console display
//! - `migration` - Plan parsing, provisioning, variable transfer, state reinit
//! - `subprocess` - Process runner abstraction with a mock for tests
//! - `tfc` - Terraform API client and payloads
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod interaction;
pub mod migration;
pub mod subprocess;
pub mod tfc;
