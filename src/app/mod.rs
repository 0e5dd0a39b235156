//! Application module
//!
//! Process-level setup shared by every command: verbosity, logging and the
//! final error report.

pub mod config;
pub mod error_handling;
pub mod logging;

pub use config::AppConfig;
pub use error_handling::handle_fatal_error;
pub use logging::init_logging;
