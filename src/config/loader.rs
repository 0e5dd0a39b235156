use super::{is_debug_value, FileConfig, OpsConfig, CONFIG_FILE_NAME};
use crate::error::{ErrorCode, OpsError, Result};
use directories::BaseDirs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Values supplied on the command line; they win over every other source.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub read_only: bool,
    pub working_dir: Option<PathBuf>,
    pub terraform_bin: Option<String>,
}

/// Resolve the layered configuration.
///
/// `env` looks up environment variables; production passes
/// `|k| std::env::var(k).ok()`, tests pass a closure over a map. The token
/// may still be empty; commands that talk to the API call [`require_token`].
pub fn resolve_config<F>(overrides: &ConfigOverrides, env: F) -> Result<OpsConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let file = match &overrides.config_path {
        Some(path) => {
            if !path.exists() {
                return Err(OpsError::config_with_code(
                    ErrorCode::CONFIG_NOT_FOUND,
                    "Config file does not exist",
                    Some(path.clone()),
                ));
            }
            read_file_config(path)?
        }
        None => match default_config_path() {
            Some(path) if path.exists() => read_file_config(&path)?,
            _ => FileConfig::default(),
        },
    };

    let mut config = OpsConfig::new(String::new());
    apply_file(&mut config, file);
    apply_env(&mut config, &env);
    apply_overrides(&mut config, overrides)?;
    Ok(config)
}

/// Reject a configuration without an API token.
pub fn require_token(config: OpsConfig) -> Result<OpsConfig> {
    if config.token.trim().is_empty() {
        return Err(OpsError::config_with_code(
            ErrorCode::CONFIG_MISSING_TOKEN,
            "Environment variable ATLAS_TOKEN is required to execute plan and migration",
            None,
        ));
    }

    debug!("Resolved configuration: {:?}", config);
    Ok(config)
}

fn default_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILE_NAME))
}

fn read_file_config(path: &Path) -> Result<FileConfig> {
    trace!("Reading config file {}", path.display());
    let content = std::fs::read_to_string(path).map_err(|e| {
        OpsError::config_with_code(
            ErrorCode::CONFIG_GENERIC,
            "Failed to read config file",
            Some(path.to_path_buf()),
        )
        .with_source(e)
    })?;
    toml::from_str(&content).map_err(|e| {
        OpsError::config_with_code(
            ErrorCode::CONFIG_INVALID_TOML,
            "Invalid TOML syntax",
            Some(path.to_path_buf()),
        )
        .with_source(e)
    })
}

fn apply_file(config: &mut OpsConfig, file: FileConfig) {
    if let Some(token) = file.token {
        config.token = token;
    }
    if let Some(debug) = file.debug {
        config.debug = debug;
    }
    if let Some(read_only) = file.read_only {
        config.read_only = read_only;
    }
    if let Some(url) = file.api_url {
        config.api_url = url;
    }
    if let Some(url) = file.legacy_api_url {
        config.legacy_api_url = url;
    }
    if let Some(bin) = file.terraform_bin {
        config.terraform_bin = bin;
    }
    if let Some(dir) = file.working_dir {
        config.working_dir = dir;
    }
    if let Some(secs) = file.request_timeout_secs {
        config.request_timeout_secs = secs;
    }
}

fn apply_env<F>(config: &mut OpsConfig, env: &F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(token) = env("ATLAS_TOKEN").filter(|t| !t.is_empty()) {
        config.token = token;
    }
    if let Some(debug) = env("TFC_OPS_DEBUG") {
        config.debug = is_debug_value(&debug);
    }
    if let Some(url) = env("TFC_OPS_API_URL") {
        config.api_url = url;
    }
    if let Some(url) = env("TFC_OPS_LEGACY_API_URL") {
        config.legacy_api_url = url;
    }
    if let Some(bin) = env("TFC_OPS_TERRAFORM_BIN") {
        config.terraform_bin = bin;
    }
}

fn apply_overrides(config: &mut OpsConfig, overrides: &ConfigOverrides) -> Result<()> {
    if overrides.read_only {
        config.read_only = true;
    }
    if let Some(bin) = &overrides.terraform_bin {
        config.terraform_bin = bin.clone();
    }
    match &overrides.working_dir {
        Some(dir) => config.working_dir = dir.clone(),
        None if config.working_dir == Path::new(".") => {
            config.working_dir = std::env::current_dir().map_err(|e| {
                OpsError::config_with_code(
                    ErrorCode::CONFIG_INVALID_VALUE,
                    "Failed to get current directory",
                    None,
                )
                .with_source(e)
            })?;
        }
        None => {}
    }
    Ok(())
}
