//! Runtime configuration for tfc-ops.
//!
//! [`OpsConfig`] is built once at startup and handed by reference to every
//! collaborator (API client, reinitializer, orchestrator). Sources are layered,
//! lowest priority first:
//!
//! 1. Hardcoded defaults
//! 2. TOML config file (`--config PATH`, otherwise `~/.tfc-ops.toml`)
//! 3. Environment variables (`ATLAS_TOKEN`, `TFC_OPS_*`)
//! 4. Command-line flags

pub mod loader;

pub use loader::{require_token, resolve_config, ConfigOverrides};

use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "https://app.terraform.io/api/v2";
pub const DEFAULT_LEGACY_API_URL: &str = "https://atlas.hashicorp.com/api/v1";
pub const DEFAULT_TERRAFORM_BIN: &str = "terraform";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Name of the config file looked up in the home directory.
pub const CONFIG_FILE_NAME: &str = ".tfc-ops.toml";

/// Accepted spellings of an enabled `TFC_OPS_DEBUG`
pub fn is_debug_value(value: &str) -> bool {
    value == "true" || value == "TRUE"
}

/// Fully resolved configuration.
#[derive(Clone)]
pub struct OpsConfig {
    /// Bearer token attached to every API call.
    pub token: String,
    /// Log request and response bodies.
    pub debug: bool,
    /// Skip every mutating API call and terraform invocation.
    pub read_only: bool,
    pub api_url: String,
    pub legacy_api_url: String,
    pub terraform_bin: String,
    /// Directory holding the terraform configuration being re-pointed.
    pub working_dir: PathBuf,
    pub request_timeout_secs: u64,
}

impl OpsConfig {
    /// Configuration with defaults for everything but the token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            debug: false,
            read_only: false,
            api_url: DEFAULT_API_URL.to_string(),
            legacy_api_url: DEFAULT_LEGACY_API_URL.to_string(),
            terraform_bin: DEFAULT_TERRAFORM_BIN.to_string(),
            working_dir: PathBuf::from("."),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }

    pub fn with_api_urls(mut self, api_url: impl Into<String>, legacy: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self.legacy_api_url = legacy.into();
        self
    }

    pub fn with_working_dir(mut self, dir: PathBuf) -> Self {
        self.working_dir = dir;
        self
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

impl fmt::Debug for OpsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpsConfig")
            .field("token", &"<redacted>")
            .field("debug", &self.debug)
            .field("read_only", &self.read_only)
            .field("api_url", &self.api_url)
            .field("legacy_api_url", &self.legacy_api_url)
            .field("terraform_bin", &self.terraform_bin)
            .field("working_dir", &self.working_dir)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// On-disk shape of `~/.tfc-ops.toml`. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct FileConfig {
    pub token: Option<String>,
    pub debug: Option<bool>,
    pub read_only: Option<bool>,
    pub api_url: Option<String>,
    pub legacy_api_url: Option<String>,
    pub terraform_bin: Option<String>,
    pub working_dir: Option<PathBuf>,
    pub request_timeout_secs: Option<u64>,
}
