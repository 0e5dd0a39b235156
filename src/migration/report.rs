use indexmap::IndexMap;
use serde::Serialize;
use std::fmt::Write as _;

/// Outcome of a batch run.
///
/// `workspaces` maps each completed workspace, in plan order, to the keys of
/// variables whose value could not be copied and must be re-entered by hand.
/// Only rows that went through every step appear there.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompletionReport {
    pub workspaces: IndexMap<String, Vec<String>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped_rows: Vec<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub malformed_rows: Vec<usize>,
}

impl CompletionReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a completed workspace. A repeated workspace name keeps its
    /// first position and gains only keys it has not listed yet.
    pub fn record_completed(&mut self, workspace: &str, sensitive_keys: Vec<String>) {
        let keys = self.workspaces.entry(workspace.to_string()).or_default();
        for key in sensitive_keys {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
    }

    pub fn record_skipped(&mut self, row: usize) {
        self.skipped_rows.push(row);
    }

    pub fn record_malformed(&mut self, row: usize) {
        self.malformed_rows.push(row);
    }

    pub fn sensitive_vars(&self, workspace: &str) -> Option<&[String]> {
        self.workspaces.get(workspace).map(Vec::as_slice)
    }

    /// Number of completed workspaces
    pub fn len(&self) -> usize {
        self.workspaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workspaces.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();

        if self.workspaces.is_empty() {
            out.push_str("No workspaces were migrated.\n");
        } else {
            out.push_str("Sensitive variables to set by hand in each new workspace:\n");
            for (workspace, keys) in &self.workspaces {
                if keys.is_empty() {
                    let _ = writeln!(out, "  {workspace}: no sensitive variables");
                } else {
                    let _ = writeln!(out, "  {workspace}: {}", keys.join(", "));
                }
            }
        }

        if !self.skipped_rows.is_empty() {
            let _ = writeln!(out, "Skipped rows: {}", join_rows(&self.skipped_rows));
        }
        if !self.malformed_rows.is_empty() {
            let _ = writeln!(out, "Malformed rows: {}", join_rows(&self.malformed_rows));
        }
        out
    }
}

fn join_rows(rows: &[usize]) -> String {
    rows.iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
