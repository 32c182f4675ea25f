//! Vercel REST adapter.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::DeploymentProviderConfig;
use crate::deployment::domain::{
    BuildFile, BuildSpec, Deployment, DeploymentState, DeploymentStatus,
};
use crate::deployment::ports::{
    DeploymentProvider, DeploymentProviderError, DeploymentProviderResult,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateDeploymentRequest<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    project: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    team_id: Option<&'a str>,
    framework: &'a str,
    build_command: &'a str,
    output_directory: &'a str,
    files: &'a [BuildFile],
    env: &'a BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeploymentResponse {
    id: String,
    url: String,
    #[serde(default)]
    alias: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusResponse {
    #[serde(default)]
    ready_state: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

/// Deployment provider backed by the Vercel deployments API.
#[derive(Debug)]
pub struct VercelDeploymentProvider {
    http: Client,
    token: Option<SecretString>,
    org_id: Option<String>,
    project_id: Option<String>,
    deployments_url: String,
}

impl VercelDeploymentProvider {
    /// Creates a provider from deployment settings.
    #[must_use]
    pub fn new(config: DeploymentProviderConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Creates a provider with a caller-supplied HTTP client.
    #[must_use]
    pub fn with_client(http: Client, config: DeploymentProviderConfig) -> Self {
        let deployments_url = format!("{}/v10/deployments", config.base_url.trim_end_matches('/'));
        Self {
            http,
            token: config.token,
            org_id: config.org_id,
            project_id: config.project_id,
            deployments_url,
        }
    }

    fn token(&self) -> DeploymentProviderResult<&SecretString> {
        self.token
            .as_ref()
            .ok_or(DeploymentProviderError::Unconfigured)
    }
}

async fn ensure_success(response: Response) -> DeploymentProviderResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "(no body)".to_owned());
    Err(DeploymentProviderError::Rejected {
        status: status.as_u16(),
        body,
    })
}

fn absolute_url(url: String) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url
    } else {
        format!("https://{url}")
    }
}

#[async_trait]
impl DeploymentProvider for VercelDeploymentProvider {
    fn is_configured(&self) -> bool {
        self.token.is_some()
    }

    async fn create_deployment(&self, spec: &BuildSpec) -> DeploymentProviderResult<Deployment> {
        let token = self.token()?;
        let request = CreateDeploymentRequest {
            name: spec.name(),
            project: self.project_id.as_deref(),
            team_id: self.org_id.as_deref(),
            framework: spec.framework(),
            build_command: spec.build_command(),
            output_directory: spec.output_directory(),
            files: spec.files(),
            env: spec.env(),
        };

        tracing::debug!(name = spec.name(), files = spec.files().len(), "creating deployment");
        let response = self
            .http
            .post(&self.deployments_url)
            .bearer_auth(token.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(DeploymentProviderError::transport)?;
        let decoded: DeploymentResponse = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|err| DeploymentProviderError::InvalidResponse(err.to_string()))?;

        Ok(Deployment::new(
            absolute_url(decoded.url),
            decoded.id,
            decoded.alias,
        ))
    }

    async fn deployment_status(
        &self,
        deploy_id: &str,
    ) -> DeploymentProviderResult<DeploymentStatus> {
        let token = self.token()?;
        let response = self
            .http
            .get(format!("{}/{deploy_id}", self.deployments_url))
            .bearer_auth(token.expose_secret())
            .send()
            .await
            .map_err(DeploymentProviderError::transport)?;
        let decoded: StatusResponse = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|err| DeploymentProviderError::InvalidResponse(err.to_string()))?;

        let state = decoded
            .ready_state
            .as_deref()
            .map_or(DeploymentState::Queued, DeploymentState::from_provider);
        Ok(DeploymentStatus::new(state, decoded.url.map(absolute_url)))
    }
}
