//! Legacy environment to workspace migration
//!
//! Reads a batch plan and, for every row, creates the new workspace, copies
//! the legacy environment's variables into it and moves the local terraform
//! state over to the new backend.

pub mod error;
pub mod orchestrator;
pub mod plan;
pub mod provision;
pub mod reinit;
pub mod report;
pub mod variables;

pub use error::{BatchFailure, MigrationError};
pub use orchestrator::{MigrationOrchestrator, ABORT_NOTICE};
pub use plan::{MigrationPlan, PlanEntry, PlanReader, PLAN_FIELD_COUNT};
pub use provision::WorkspaceProvisioner;
pub use reinit::{StateReinitializer, STATE_CACHE_DIR, STATE_MIGRATION_ANSWER};
pub use report::CompletionReport;
pub use variables::{sensitive_keys, VariableTransfer};
