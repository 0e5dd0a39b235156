//! CLI command handlers
//!
//! Argument structures, routing and one module per command.

pub mod args;
pub mod commands;
pub mod router;

pub use args::{Cli, Commands, PlanCommands, VariablesCommands};
pub use router::execute_command;
