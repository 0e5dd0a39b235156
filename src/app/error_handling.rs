//! Error handling utilities

use tracing::error;

use crate::error::{describe_error_code, OpsError};

/// Report a fatal error and exit with its status code.
pub fn handle_fatal_error(error: anyhow::Error, verbose: u8) -> ! {
    error!("Fatal error: {}", error);

    let (report, exit_code) = fatal_report(&error, verbose);
    eprintln!("{report}");
    std::process::exit(exit_code)
}

/// Text printed for a fatal error and the process exit code.
///
/// An [`OpsError`] gives its user message, plus its code description and the
/// developer message with the full chain when `verbose >= 1`. Anything else
/// gives its message (and chain when verbose) and exits with 1.
pub fn fatal_report(error: &anyhow::Error, verbose: u8) -> (String, i32) {
    let mut report = String::new();

    let exit_code = if let Some(ops_err) = error.downcast_ref::<OpsError>() {
        report.push_str(&ops_err.user_message());

        if verbose >= 1 {
            let code = ops_err.code();
            report.push_str(&format!(
                "\n\n[E{:04}] {}",
                code,
                describe_error_code(code)
            ));
            report.push_str(&format!("\nContext Chain:\n{}", ops_err.developer_message()));
        }

        ops_err.exit_code()
    } else {
        report.push_str(&format!("Error: {error}"));

        if verbose >= 1 {
            report.push_str("\n\nError chain:");
            for (i, cause) in error.chain().enumerate() {
                report.push_str(&format!("\n  {}: {}", i, cause));
            }
        }
        1
    };

    (report, exit_code)
}
