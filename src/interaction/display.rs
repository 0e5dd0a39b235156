//! Operator-facing message display

use std::sync::{Arc, Mutex};

/// Trait for displaying migration messages to the operator
pub trait MigrationDisplay: Send + Sync {
    /// Display information message
    fn info(&self, message: &str);

    /// Display warning message
    fn warning(&self, message: &str);

    /// Display error message
    fn error(&self, message: &str);

    /// Display success message
    fn success(&self, message: &str);
}

/// Prints to stdout/stderr
pub struct ConsoleDisplay;

impl Default for ConsoleDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleDisplay {
    pub fn new() -> Self {
        Self
    }
}

impl MigrationDisplay for ConsoleDisplay {
    fn info(&self, message: &str) {
        println!("ℹ️  {message}");
    }

    fn warning(&self, message: &str) {
        eprintln!("⚠️  {message}");
    }

    fn error(&self, message: &str) {
        eprintln!("❌ {message}");
    }

    fn success(&self, message: &str) {
        println!("✅ {message}");
    }
}

/// Keeps every message, prefixed with its level
#[derive(Clone, Default)]
pub struct RecordingDisplay {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    fn push(&self, level: &str, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(format!("{level}: {message}"));
    }
}

impl MigrationDisplay for RecordingDisplay {
    fn info(&self, message: &str) {
        self.push("INFO", message);
    }

    fn warning(&self, message: &str) {
        self.push("WARN", message);
    }

    fn error(&self, message: &str) {
        self.push("ERROR", message);
    }

    fn success(&self, message: &str) {
        self.push("SUCCESS", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_display_levels() {
        let display = RecordingDisplay::new();
        display.info("starting");
        display.warning("row 3 skipped");
        display.error("failed");
        display.success("done");

        assert_eq!(
            display.get_messages(),
            vec![
                "INFO: starting",
                "WARN: row 3 skipped",
                "ERROR: failed",
                "SUCCESS: done"
            ]
        );
    }

    #[test]
    fn test_recording_display_clones_share_messages() {
        let display = RecordingDisplay::new();
        let clone = display.clone();
        clone.info("from clone");
        assert_eq!(display.get_messages(), vec!["INFO: from clone"]);
    }
}
