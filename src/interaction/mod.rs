//! Operator interaction for migrations
//!
//! Provides the per-row confirmation seam and the console message display.

pub mod confirm;
pub mod display;

pub use confirm::{
    AlwaysProceed, ConfirmationStrategy, Decision, ScriptedConfirmation, TerminalConfirmation,
};
pub use display::{ConsoleDisplay, MigrationDisplay, RecordingDisplay};
