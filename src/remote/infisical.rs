//! Infisical REST client.
//!
//! Authenticates with a machine identity (universal auth) and reads and
//! writes raw secrets in one project/environment/path scope:
//!
//! - `POST  /api/v1/auth/universal-auth/login`
//! - `GET   /api/v3/secrets/raw?workspaceId=..&environment=..&secretPath=..`
//! - `POST  /api/v3/secrets/raw/{name}`
//! - `PATCH /api/v3/secrets/raw/{name}`
//!
//! Uses blocking `ureq`; every call completes before the next starts.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use ureq::Agent;
use zeroize::Zeroizing;

use super::RemoteStore;
use crate::config::{Config, Credentials};
use crate::envfile::SecretMap;
use crate::errors::{EnvSyncError, Result};

/// Per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct ListResponse {
    secrets: Vec<RawSecret>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSecret {
    secret_key: String,
    #[serde(default)]
    secret_value: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WriteRequest<'a> {
    workspace_id: &'a str,
    environment: &'a str,
    secret_path: &'a str,
    secret_value: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
}

/// An authenticated session against one Infisical project/environment.
pub struct InfisicalClient {
    agent: Agent,
    base_url: String,
    access_token: Zeroizing<String>,
    project_id: String,
    environment: String,
    secret_path: String,
}

impl InfisicalClient {
    /// Log in with universal auth and scope the client to `config`'s
    /// environment and secret path.
    pub fn login(config: &Config, credentials: &Credentials) -> Result<Self> {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(REQUEST_TIMEOUT))
            .build()
            .into();
        let base_url = config.api_url.trim_end_matches('/').to_string();

        tracing::debug!(api_url = %base_url, "logging in with universal auth");
        let mut response = agent
            .post(format!("{base_url}/api/v1/auth/universal-auth/login"))
            .send_json(LoginRequest {
                client_id: &credentials.client_id,
                client_secret: &credentials.client_secret,
            })
            .map_err(|e| remote_error("login", e))?;

        let login: LoginResponse = response
            .body_mut()
            .read_json()
            .map_err(|e| remote_error("login response", e))?;

        Ok(Self {
            agent,
            base_url,
            access_token: Zeroizing::new(login.access_token),
            project_id: credentials.project_id.clone(),
            environment: config.environment.clone(),
            secret_path: config.secret_path.clone(),
        })
    }

    fn secrets_url(&self) -> String {
        format!("{}/api/v3/secrets/raw", self.base_url)
    }

    /// URL of one secret; the name is a single encoded path segment.
    fn secret_url(&self, name: &str) -> String {
        format!("{}/{}", self.secrets_url(), urlencoding::encode(name))
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token.as_str())
    }

    fn write_body<'a>(&'a self, value: &'a str) -> WriteRequest<'a> {
        WriteRequest {
            workspace_id: &self.project_id,
            environment: &self.environment,
            secret_path: &self.secret_path,
            secret_value: value,
            kind: "shared",
        }
    }
}

impl RemoteStore for InfisicalClient {
    fn list_secrets(&self) -> Result<SecretMap> {
        tracing::debug!(
            project = %self.project_id,
            environment = %self.environment,
            path = %self.secret_path,
            "listing remote secrets"
        );
        let mut response = self
            .agent
            .get(self.secrets_url())
            .query("workspaceId", &self.project_id)
            .query("environment", &self.environment)
            .query("secretPath", &self.secret_path)
            .header("Authorization", self.bearer())
            .call()
            .map_err(|e| remote_error("list secrets", e))?;

        let list: ListResponse = response
            .body_mut()
            .read_json()
            .map_err(|e| remote_error("list secrets response", e))?;

        Ok(list
            .secrets
            .into_iter()
            .map(|s| (s.secret_key, s.secret_value))
            .collect())
    }

    fn create_secret(&self, name: &str, value: &str) -> Result<()> {
        tracing::debug!(secret = name, "creating remote secret");
        self.agent
            .post(self.secret_url(name))
            .header("Authorization", self.bearer())
            .send_json(self.write_body(value))
            .map_err(|e| remote_error(&format!("create '{name}'"), e))?;
        Ok(())
    }

    fn update_secret(&self, name: &str, value: &str) -> Result<()> {
        tracing::debug!(secret = name, "updating remote secret");
        self.agent
            .patch(self.secret_url(name))
            .header("Authorization", self.bearer())
            .send_json(self.write_body(value))
            .map_err(|e| remote_error(&format!("update '{name}'"), e))?;
        Ok(())
    }
}

/// Map a transport or status error into `RemoteIo`.
fn remote_error(action: &str, err: ureq::Error) -> EnvSyncError {
    match err {
        ureq::Error::StatusCode(401 | 403) => EnvSyncError::RemoteIo(format!(
            "{action}: access denied — check the client id, client secret and project id"
        )),
        ureq::Error::StatusCode(code) => {
            EnvSyncError::RemoteIo(format!("{action}: server returned HTTP {code}"))
        }
        other => EnvSyncError::RemoteIo(format!("{action}: {other}")),
    }
}
