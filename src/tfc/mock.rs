use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use super::client::TfcApi;
use super::error::TfcError;
use super::types::{EscapedVar, TfVar, WorkspaceRequest};

/// A call received by [`MockTfcApi`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    ListVariables {
        organization: String,
        environment: String,
    },
    CreateWorkspace {
        organization: String,
        request: WorkspaceRequest,
    },
    CreateVariable {
        organization: String,
        workspace: String,
        var: EscapedVar,
    },
}

#[derive(Default)]
struct MockState {
    legacy_vars: HashMap<(String, String), Vec<TfVar>>,
    failing_workspaces: HashSet<String>,
    failing_variables: HashSet<String>,
    calls: Vec<ApiCall>,
}

/// In-memory [`TfcApi`] that records every call.
///
/// Unknown legacy environments answer 404, matching the real API.
#[derive(Clone, Default)]
pub struct MockTfcApi {
    state: Arc<Mutex<MockState>>,
}

impl MockTfcApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_legacy_vars(self, organization: &str, environment: &str, vars: Vec<TfVar>) -> Self {
        self.state
            .lock()
            .unwrap()
            .legacy_vars
            .insert((organization.to_string(), environment.to_string()), vars);
        self
    }

    /// Creating a workspace with this name answers 422
    pub fn fail_workspace(self, name: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .failing_workspaces
            .insert(name.to_string());
        self
    }

    /// Creating a variable with this key answers 422
    pub fn fail_variable(self, key: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .failing_variables
            .insert(key.to_string());
        self
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn created_workspaces(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ApiCall::CreateWorkspace { request, .. } => Some(request.name),
                _ => None,
            })
            .collect()
    }

    pub fn created_variables(&self, workspace: &str) -> Vec<EscapedVar> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ApiCall::CreateVariable { workspace: ws, var, .. } if ws == workspace => Some(var),
                _ => None,
            })
            .collect()
    }
}

fn unprocessable(url: String, body: &str) -> TfcError {
    TfcError::Status {
        method: "POST",
        url,
        status: 422,
        body: body.to_string(),
    }
}

#[async_trait]
impl TfcApi for MockTfcApi {
    async fn list_legacy_variables(
        &self,
        organization: &str,
        environment: &str,
    ) -> Result<Vec<TfVar>, TfcError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(ApiCall::ListVariables {
            organization: organization.to_string(),
            environment: environment.to_string(),
        });

        state
            .legacy_vars
            .get(&(organization.to_string(), environment.to_string()))
            .cloned()
            .ok_or_else(|| TfcError::Status {
                method: "GET",
                url: format!("mock://legacy/{}/{}", organization, environment),
                status: 404,
                body: "not found".to_string(),
            })
    }

    async fn create_workspace(
        &self,
        organization: &str,
        request: &WorkspaceRequest,
    ) -> Result<(), TfcError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(ApiCall::CreateWorkspace {
            organization: organization.to_string(),
            request: request.clone(),
        });

        if state.failing_workspaces.contains(&request.name) {
            return Err(unprocessable(
                format!("mock://organizations/{}/workspaces", organization),
                "Name has already been taken",
            ));
        }
        Ok(())
    }

    async fn create_variable(
        &self,
        organization: &str,
        workspace: &str,
        var: &EscapedVar,
    ) -> Result<(), TfcError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(ApiCall::CreateVariable {
            organization: organization.to_string(),
            workspace: workspace.to_string(),
            var: var.clone(),
        });

        if state.failing_variables.contains(var.key()) {
            return Err(unprocessable(
                "mock://vars".to_string(),
                "Key has already been taken",
            ));
        }
        Ok(())
    }
}
