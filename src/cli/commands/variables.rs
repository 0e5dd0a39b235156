//! `tfc-ops variables list`

use anyhow::Result;
use std::sync::Arc;

use crate::config::OpsConfig;
use crate::error::OpsError;
use crate::migration::VariableTransfer;
use crate::tfc::{HttpTfcClient, TfVar};

pub async fn run_variables_list(
    config: &OpsConfig,
    organization: &str,
    environment: &str,
) -> Result<()> {
    let api = HttpTfcClient::new(config).map_err(OpsError::from)?;
    let transfer = VariableTransfer::new(Arc::new(api));

    let vars = transfer
        .fetch_legacy_variables(organization, environment)
        .await
        .map_err(OpsError::from)?;

    print!("{}", format_variables(&vars));
    Ok(())
}

/// One line per variable; sensitive values are flagged instead of shown.
pub fn format_variables(vars: &[TfVar]) -> String {
    if vars.is_empty() {
        return "No variables\n".to_string();
    }

    let width = vars.iter().map(|v| v.key.len()).max().unwrap_or(0);
    let mut out = String::new();
    for var in vars {
        let value = if var.is_sensitive() {
            "<sensitive, set by hand after migration>"
        } else {
            var.value.as_str()
        };
        let kind = if var.hcl { " (hcl)" } else { "" };
        out.push_str(&format!("{:<width$} = {}{}\n", var.key, value, kind, width = width));
    }
    out
}
