//! Per-row confirmation strategies

use async_trait::async_trait;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex};

use crate::migration::MigrationPlan;

pub const CONFIRMATION_PROMPT: &str =
    "Would you like to S=skip or A=abort? (Hit any other key to continue.) ... ";

/// Operator verdict for one plan row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Proceed,
    Skip,
    Abort,
}

impl Decision {
    /// Interpret a console response. Only the first character counts.
    pub fn from_response(input: &str) -> Self {
        match input.trim_start().chars().next() {
            Some('a') | Some('A') => Decision::Abort,
            Some('s') | Some('S') => Decision::Skip,
            _ => Decision::Proceed,
        }
    }
}

/// Decides whether a parsed row should be migrated
#[async_trait]
pub trait ConfirmationStrategy: Send + Sync {
    async fn decide(&self, row: usize, plan: &MigrationPlan) -> io::Result<Decision>;
}

#[async_trait]
impl<T: ConfirmationStrategy + ?Sized> ConfirmationStrategy for Arc<T> {
    async fn decide(&self, row: usize, plan: &MigrationPlan) -> io::Result<Decision> {
        (**self).decide(row, plan).await
    }
}

/// Asks the operator on the console and blocks until a line is entered
pub struct TerminalConfirmation;

impl TerminalConfirmation {
    pub fn new() -> Self {
        Self
    }

    fn ask<R: BufRead, W: Write>(
        plan: &MigrationPlan,
        input: &mut R,
        output: &mut W,
    ) -> io::Result<Decision> {
        writeln!(
            output,
            "About to create version 2 workspace for {}/{}",
            plan.new_org, plan.new_workspace
        )?;
        write!(output, "{}", CONFIRMATION_PROMPT)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            // Nobody can answer a closed console
            return Ok(Decision::Abort);
        }
        Ok(Decision::from_response(&line))
    }
}

impl Default for TerminalConfirmation {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfirmationStrategy for TerminalConfirmation {
    async fn decide(&self, _row: usize, plan: &MigrationPlan) -> io::Result<Decision> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        Self::ask(plan, &mut stdin.lock(), &mut stdout.lock())
    }
}

/// Proceeds with every row without asking
pub struct AlwaysProceed;

#[async_trait]
impl ConfirmationStrategy for AlwaysProceed {
    async fn decide(&self, row: usize, plan: &MigrationPlan) -> io::Result<Decision> {
        tracing::debug!(
            "Auto-accepting row {} ({}/{})",
            row,
            plan.new_org,
            plan.new_workspace
        );
        Ok(Decision::Proceed)
    }
}

/// Replays queued decisions; proceeds once the queue runs dry
#[derive(Default)]
pub struct ScriptedConfirmation {
    decisions: Mutex<VecDeque<Decision>>,
    asked: Mutex<Vec<usize>>,
}

impl ScriptedConfirmation {
    pub fn new(decisions: impl IntoIterator<Item = Decision>) -> Self {
        Self {
            decisions: Mutex::new(decisions.into_iter().collect()),
            asked: Mutex::new(Vec::new()),
        }
    }

    /// Row numbers the orchestrator asked about, in order
    pub fn asked_rows(&self) -> Vec<usize> {
        self.asked.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConfirmationStrategy for ScriptedConfirmation {
    async fn decide(&self, row: usize, _plan: &MigrationPlan) -> io::Result<Decision> {
        self.asked.lock().unwrap().push(row);
        Ok(self
            .decisions
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Decision::Proceed))
    }
}
