//! HTTP client for the legacy and current Terraform APIs

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use super::error::TfcError;
use super::types::{
    CreateVariablePayload, CreateWorkspacePayload, EscapedVar, LegacyConfigResponse, TfVar,
    WorkspaceRequest,
};
use crate::config::OpsConfig;

const JSON_API: &str = "application/vnd.api+json";

/// Operations the migration needs from the remote platform.
#[async_trait]
pub trait TfcApi: Send + Sync {
    /// Variables of the latest configuration version of a legacy environment.
    async fn list_legacy_variables(
        &self,
        organization: &str,
        environment: &str,
    ) -> Result<Vec<TfVar>, TfcError>;

    /// Create a VCS-backed workspace in `organization`.
    async fn create_workspace(
        &self,
        organization: &str,
        request: &WorkspaceRequest,
    ) -> Result<(), TfcError>;

    /// Create one terraform variable in `organization`/`workspace`.
    async fn create_variable(
        &self,
        organization: &str,
        workspace: &str,
        var: &EscapedVar,
    ) -> Result<(), TfcError>;
}

/// Production [`TfcApi`] backed by reqwest.
pub struct HttpTfcClient {
    client: Client,
    api_url: Url,
    legacy_api_url: Url,
    debug: bool,
    read_only: bool,
}

impl HttpTfcClient {
    pub fn new(config: &OpsConfig) -> Result<Self, TfcError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|_| TfcError::InvalidToken)?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(TfcError::Client)?;

        Ok(Self {
            client,
            api_url: parse_base(&config.api_url)?,
            legacy_api_url: parse_base(&config.legacy_api_url)?,
            debug: config.debug,
            read_only: config.read_only,
        })
    }

    async fn post(&self, url: Url, body: Vec<u8>) -> Result<(), TfcError> {
        if self.read_only {
            info!("Read-only mode: skipping POST {}", url);
            return Ok(());
        }

        if self.debug {
            debug!("POST {} body: {}", url, String::from_utf8_lossy(&body));
        }

        let response = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, JSON_API)
            .body(body)
            .send()
            .await
            .map_err(|e| TfcError::Transport {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| TfcError::Transport {
            url: url.to_string(),
            source: e,
        })?;
        if self.debug {
            debug!("POST {} -> {}: {}", url, status, body);
        }

        if !status.is_success() {
            return Err(TfcError::Status {
                method: "POST",
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

/// Parse a base URL, dropping any trailing slash so segments append cleanly.
fn parse_base(raw: &str) -> Result<Url, TfcError> {
    let url = Url::parse(raw.trim_end_matches('/')).map_err(|_| TfcError::InvalidUrl(raw.into()))?;
    if url.cannot_be_a_base() {
        return Err(TfcError::InvalidUrl(raw.into()));
    }
    Ok(url)
}

/// Append percent-encoded path segments to a base URL.
fn join_segments(base: &Url, segments: &[&str]) -> Result<Url, TfcError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| TfcError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[async_trait]
impl TfcApi for HttpTfcClient {
    async fn list_legacy_variables(
        &self,
        organization: &str,
        environment: &str,
    ) -> Result<Vec<TfVar>, TfcError> {
        let url = join_segments(
            &self.legacy_api_url,
            &[
                "terraform",
                "configurations",
                organization,
                environment,
                "versions",
                "latest",
            ],
        )?;
        debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| TfcError::Transport {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| TfcError::Transport {
            url: url.to_string(),
            source: e,
        })?;
        if self.debug {
            debug!("GET {} -> {}: {}", url, status, body);
        }

        if !status.is_success() {
            return Err(TfcError::Status {
                method: "GET",
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let parsed: LegacyConfigResponse =
            serde_json::from_str(&body).map_err(|e| TfcError::Decode {
                url: url.to_string(),
                source: e,
            })?;
        Ok(parsed.version.tf_vars)
    }

    async fn create_workspace(
        &self,
        organization: &str,
        request: &WorkspaceRequest,
    ) -> Result<(), TfcError> {
        let url = join_segments(&self.api_url, &["organizations", organization, "workspaces"])?;
        let body = serde_json::to_vec(&CreateWorkspacePayload::new(request)).map_err(|e| {
            TfcError::Encode {
                subject: request.name.clone(),
                source: e,
            }
        })?;
        self.post(url, body).await
    }

    async fn create_variable(
        &self,
        organization: &str,
        workspace: &str,
        var: &EscapedVar,
    ) -> Result<(), TfcError> {
        let url = join_segments(&self.api_url, &["vars"])?;
        let encode_error = |e: serde_json::Error| TfcError::Encode {
            subject: var.key().to_string(),
            source: e,
        };
        let payload =
            CreateVariablePayload::new(organization, workspace, var).map_err(encode_error)?;
        let body = serde_json::to_vec(&payload).map_err(encode_error)?;
        self.post(url, body).await
    }
}
