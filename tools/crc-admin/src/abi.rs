//! Publishing of compiled-contract interface artifacts to the drive store.
//!
//! Artifacts live as JSON files under a fixed build output directory and are
//! uploaded by name into the remote `ABI` drive bucket, keyed by a project
//! credential taken from the environment.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable holding the drive project key
/// (`<project id>_<secret>`).
pub const PROJECT_KEY_ENV: &str = "DRIVE_PROJECT_KEY";

/// Fixed build output directory holding the interface artifacts.
pub const ARTIFACT_DIR: &str = "build/contracts";

/// Name of the drive bucket the artifacts are uploaded into.
pub const DRIVE_NAME: &str = "ABI";

pub const DEFAULT_BASE_URL: &str = "https://drive.deta.sh/v1";

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("{PROJECT_KEY_ENV} is not set")]
    MissingProjectKey,
    #[error("project key is malformed (expected `<project id>_<secret>`)")]
    MalformedProjectKey,
    #[error("failed to read artifact {0}: {1}")]
    ArtifactRead(PathBuf, std::io::Error),
    #[error("artifact {0} is not valid JSON: {1}")]
    ArtifactParse(PathBuf, serde_json::Error),
    #[error("upload failed with HTTP status {0}")]
    UploadStatus(reqwest::StatusCode),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Append the `.json` suffix when the caller left it off.
pub fn artifact_file_name(contract_name: &str) -> String {
    if contract_name.ends_with(".json") {
        contract_name.to_string()
    } else {
        format!("{contract_name}.json")
    }
}

/// Minimal client for the drive HTTP API:
/// `POST {base}/{project id}/{drive}/files?name=<file>`.
pub struct DriveClient {
    client: reqwest::Client,
    base_url: String,
    project_id: String,
    api_key: String,
    drive: String,
}

impl DriveClient {
    pub fn new(
        base_url: impl Into<String>,
        project_key: &str,
        drive: impl Into<String>,
    ) -> Result<Self, PublishError> {
        // The project id is the key's prefix before the first underscore.
        let (project_id, secret) = project_key
            .split_once('_')
            .ok_or(PublishError::MalformedProjectKey)?;
        if project_id.is_empty() || secret.is_empty() {
            return Err(PublishError::MalformedProjectKey);
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            client,
            base_url,
            project_id: project_id.to_string(),
            api_key: project_key.to_string(),
            drive: drive.into(),
        })
    }

    /// Build a client for the `ABI` bucket from the environment credential.
    pub fn from_env(base_url: impl Into<String>) -> Result<Self, PublishError> {
        let key = std::env::var(PROJECT_KEY_ENV).map_err(|_| PublishError::MissingProjectKey)?;
        Self::new(base_url, &key, DRIVE_NAME)
    }

    pub async fn put(&self, name: &str, body: Vec<u8>) -> Result<(), PublishError> {
        let url = format!("{}/{}/{}/files", self.base_url, self.project_id, self.drive);

        let response = self
            .client
            .post(&url)
            .query(&[("name", name)])
            .header("X-Api-Key", &self.api_key)
            .body(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PublishError::UploadStatus(response.status()));
        }

        Ok(())
    }
}

/// Read, re-serialize and upload one contract interface artifact. Returns
/// the stored file name.
pub async fn publish(
    drive: &DriveClient,
    artifact_dir: &Path,
    contract_name: &str,
) -> Result<String, PublishError> {
    let file_name = artifact_file_name(contract_name);
    let path = artifact_dir.join(&file_name);

    let raw = std::fs::read(&path).map_err(|e| PublishError::ArtifactRead(path.clone(), e))?;
    let value: serde_json::Value =
        serde_json::from_slice(&raw).map_err(|e| PublishError::ArtifactParse(path.clone(), e))?;
    let body = serde_json::to_vec(&value).map_err(|e| PublishError::ArtifactParse(path, e))?;

    drive.put(&file_name, body).await?;
    tracing::info!(artifact = %file_name, "stored in drive");

    Ok(file_name)
}
