//! Terraform API access
//!
//! - `client` - the [`TfcApi`] seam and its reqwest implementation
//! - `types` - variables, workspace requests and JSON:API payloads
//! - `mock` - recording in-memory implementation for tests

pub mod client;
pub mod error;
pub mod mock;
pub mod types;

pub use client::{HttpTfcClient, TfcApi};
pub use error::TfcError;
pub use mock::{ApiCall, MockTfcApi};
pub use types::{EscapedVar, TfVar, WorkspaceRequest, SENSITIVE_SENTINEL};
