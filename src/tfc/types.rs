//! Entities exchanged with the Terraform APIs and their JSON:API payloads.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

/// Value the legacy API returns in place of a secret.
pub const SENSITIVE_SENTINEL: &str = "TF_ENTERPRISE_SENSITIVE_VAR";

/// A workspace variable as read from a legacy environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TfVar {
    pub key: String,
    pub value: String,
    /// Value is a Terraform expression rather than a literal string.
    #[serde(default)]
    pub hcl: bool,
}

impl TfVar {
    pub fn new(key: impl Into<String>, value: impl Into<String>, hcl: bool) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            hcl,
        }
    }

    /// The legacy API hid this variable's value behind the sentinel.
    pub fn is_sensitive(&self) -> bool {
        self.value == SENSITIVE_SENTINEL
    }

    /// Prepare the variable for submission.
    ///
    /// HCL values are escaped into JSON string content: backslashes, double
    /// quotes and control characters. Other values pass through untouched.
    /// Consuming `self` means a variable can only ever be escaped once.
    pub fn escape_hcl(self) -> EscapedVar {
        let value = if self.hcl {
            escape_expression(&self.value)
        } else {
            self.value
        };
        EscapedVar {
            key: self.key,
            value,
            hcl: self.hcl,
        }
    }
}

fn escape_expression(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len() + 8);
    for c in raw.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                escaped.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => escaped.push(c),
        }
    }
    escaped
}

/// A variable ready to be embedded in a create-variable payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscapedVar {
    key: String,
    value: String,
    hcl: bool,
}

impl EscapedVar {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn hcl(&self) -> bool {
        self.hcl
    }

    /// JSON representation of the value.
    ///
    /// An escaped HCL value is already valid JSON string content and is
    /// embedded verbatim; a plain value is serialized normally.
    pub fn json_value(&self) -> Result<Box<RawValue>, serde_json::Error> {
        if self.hcl {
            RawValue::from_string(format!("\"{}\"", self.value))
        } else {
            serde_json::value::to_raw_value(&self.value)
        }
    }
}

/// Everything needed to create a VCS-backed workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceRequest {
    pub name: String,
    pub terraform_version: String,
    pub working_directory: String,
    pub vcs_identifier: String,
    pub vcs_branch: String,
    pub oauth_token_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateWorkspacePayload<'a> {
    pub data: WorkspaceData<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct WorkspaceData<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub attributes: WorkspaceAttributes<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct WorkspaceAttributes<'a> {
    pub name: &'a str,
    pub terraform_version: &'a str,
    #[serde(rename = "working-directory")]
    pub working_directory: &'a str,
    #[serde(rename = "vcs-repo")]
    pub vcs_repo: VcsRepo<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct VcsRepo<'a> {
    pub identifier: &'a str,
    #[serde(rename = "oauth-token-id")]
    pub oauth_token_id: &'a str,
    pub branch: &'a str,
    #[serde(rename = "default-branch")]
    pub default_branch: bool,
}

impl<'a> CreateWorkspacePayload<'a> {
    pub fn new(request: &'a WorkspaceRequest) -> Self {
        Self {
            data: WorkspaceData {
                kind: "workspaces",
                attributes: WorkspaceAttributes {
                    name: &request.name,
                    terraform_version: &request.terraform_version,
                    working_directory: &request.working_directory,
                    vcs_repo: VcsRepo {
                        identifier: &request.vcs_identifier,
                        oauth_token_id: &request.oauth_token_id,
                        branch: &request.vcs_branch,
                        default_branch: true,
                    },
                },
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateVariablePayload<'a> {
    pub data: VariableData<'a>,
    pub filter: VariableFilter<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct VariableData<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub attributes: VariableAttributes<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct VariableAttributes<'a> {
    pub key: &'a str,
    pub value: Box<RawValue>,
    pub category: &'static str,
    pub hcl: bool,
    pub sensitive: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct VariableFilter<'a> {
    pub organization: NameRef<'a>,
    pub workspace: NameRef<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct NameRef<'a> {
    pub name: &'a str,
}

impl<'a> CreateVariablePayload<'a> {
    pub fn new(
        organization: &'a str,
        workspace: &'a str,
        var: &'a EscapedVar,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            data: VariableData {
                kind: "vars",
                attributes: VariableAttributes {
                    key: var.key(),
                    value: var.json_value()?,
                    category: "terraform",
                    hcl: var.hcl(),
                    sensitive: false,
                },
            },
            filter: VariableFilter {
                organization: NameRef { name: organization },
                workspace: NameRef { name: workspace },
            },
        })
    }
}

/// Body of the legacy "latest configuration version" endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct LegacyConfigResponse {
    pub version: LegacyConfigVersion,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LegacyConfigVersion {
    #[serde(default)]
    pub tf_vars: Vec<TfVar>,
}
